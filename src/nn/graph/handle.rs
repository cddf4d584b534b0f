//! Graph 句柄（用户级 API）

use super::error::GraphError;
use super::inner::GraphInner;
use crate::nn::NodeId;
use crate::nn::var::{Init, Var};
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Graph - 计算图句柄（PyTorch 风格用户 API）
///
/// # 设计原则
/// - 是 `Rc<RefCell<GraphInner>>` 的薄封装
/// - Clone 语义：多个 Graph 引用同一个 GraphInner
/// - 创建的 Var 自动持有图引用
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    // ==================== 创建 ====================

    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    /// 创建带种子的图（用于确定性训练）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_inner(GraphInner::new_with_seed(seed))
    }

    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub(in crate::nn) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    /// 两个句柄是否指向同一个图
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(in crate::nn) fn inner_rc(&self) -> Rc<RefCell<GraphInner>> {
        Rc::clone(&self.inner)
    }

    /// 将 NodeId 包装成 Var
    pub fn wrap_node_id(&self, node_id: NodeId) -> Var {
        Var::new(node_id, Rc::clone(&self.inner))
    }

    // ==================== 创建变量 ====================

    /// 创建输入节点并设置数据
    pub fn input(&self, data: &Tensor) -> Result<Var, GraphError> {
        let node_id = self.inner.borrow_mut().new_input_node(data, None)?;
        Ok(self.wrap_node_id(node_id))
    }

    /// 创建命名输入节点
    pub fn input_named(&self, data: &Tensor, name: &str) -> Result<Var, GraphError> {
        let node_id = self.inner.borrow_mut().new_input_node(data, Some(name))?;
        Ok(self.wrap_node_id(node_id))
    }

    /// 创建参数节点，初始值由图的随机数生成器按`init`生成
    pub fn parameter(&self, shape: &[usize], init: Init, name: &str) -> Result<Var, GraphError> {
        let mut g = self.inner.borrow_mut();
        let init_data = init.generate_with_rng(shape, g.rng_mut());
        let node_id = g.new_parameter_node(&init_data, name)?;
        drop(g);
        Ok(self.wrap_node_id(node_id))
    }

    /// 用给定张量创建参数节点
    pub fn parameter_from_tensor(&self, data: &Tensor, name: &str) -> Result<Var, GraphError> {
        let node_id = self.inner.borrow_mut().new_parameter_node(data, name)?;
        Ok(self.wrap_node_id(node_id))
    }

    pub fn zeros(&self, shape: &[usize]) -> Result<Var, GraphError> {
        self.input(&Tensor::zeros(shape))
    }

    pub fn ones(&self, shape: &[usize]) -> Result<Var, GraphError> {
        self.input(&Tensor::ones(shape))
    }

    /// 所有元素均为`value`的常量
    pub fn constant(&self, value: f32, shape: &[usize]) -> Result<Var, GraphError> {
        self.input(&Tensor::full(value, shape))
    }

    /// 标准正态分布的随机输入（使用图的随机数生成器）
    pub fn randn(&self, shape: &[usize]) -> Result<Var, GraphError> {
        let data = {
            let mut g = self.inner.borrow_mut();
            Tensor::normal_with_rng(0.0, 1.0, shape, g.rng_mut())
        };
        self.input(&data)
    }

    // ==================== 训练辅助 ====================

    /// 反向传播（等价于`loss.backward()`）
    pub fn backward(&self, loss: &Var) -> Result<f32, GraphError> {
        loss.backward()
    }

    /// 清除所有参数的梯度
    pub fn zero_grad(&self) {
        self.inner.borrow_mut().zero_grad();
    }

    pub fn train(&self) {
        self.inner.borrow_mut().set_train_mode();
    }

    pub fn eval(&self) {
        self.inner.borrow_mut().set_eval_mode();
    }

    pub fn is_eval(&self) -> bool {
        !self.inner.borrow().is_train_mode()
    }

    /// 在 no_grad 上下文中执行闭包：期间创建的节点都不需要梯度
    pub fn no_grad_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let was_train = self.inner.borrow().is_train_mode();
        self.inner.borrow_mut().set_eval_mode();
        let result = f();
        if was_train {
            self.inner.borrow_mut().set_train_mode();
        }
        result
    }

    /// 释放本步创建的所有非参数节点，返回释放的节点数
    pub fn release_transient_nodes(&self) -> usize {
        self.inner.borrow_mut().release_transient_nodes()
    }

    pub fn nodes_count(&self) -> usize {
        self.inner.borrow().nodes_count()
    }

    /// 图中所有参数（按创建顺序）
    pub fn parameters(&self) -> Vec<Var> {
        let ids = self.inner.borrow().get_trainable_nodes();
        ids.into_iter().map(|id| self.wrap_node_id(id)).collect()
    }

    // ==================== 参数读写 ====================

    pub fn save_params<P: AsRef<Path>>(&self, path: P) -> Result<(), GraphError> {
        self.inner.borrow().save_params(path)
    }

    /// 只保存给定参数（如某个子网络的参数）
    pub fn save_params_of<P: AsRef<Path>>(&self, path: P, params: &[Var]) -> Result<(), GraphError> {
        let g = self.inner.borrow();
        let names = params
            .iter()
            .map(|p| g.get_node_name(p.node_id()).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;
        g.save_named_params(path, &names)
    }

    pub fn load_params<P: AsRef<Path>>(&self, path: P) -> Result<usize, GraphError> {
        self.inner.borrow_mut().load_params(path)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
