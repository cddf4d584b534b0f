//! Var - 变量句柄，携带图引用，支持 Result 风格的链式调用

use super::graph::{Graph, GraphInner};
use super::{GraphError, NodeId};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;

// ==================== Init 枚举 ====================

/// 参数初始化策略
#[derive(Debug, Clone)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零
    Zeros,
    /// 全一
    Ones,
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// Kaiming/He 初始化（适用于 ReLU 类激活）
    Kaiming,
    /// Xavier/Glorot 初始化（适用于 Sigmoid/Tanh）
    Xavier,
}

impl Init {
    /// 生成初始化后的 Tensor（使用指定的 RNG）
    ///
    /// fan_in/fan_out 的约定：线性层权重为[in, out]；
    /// 卷积核为[out_c, in_c, kH, kW]，fan_in = in_c·kH·kW，fan_out = out_c·kH·kW。
    pub fn generate_with_rng(&self, shape: &[usize], rng: &mut StdRng) -> Tensor {
        match self {
            Self::Constant(v) => Tensor::full(*v, shape),
            Self::Zeros => Tensor::zeros(shape),
            Self::Ones => Tensor::ones(shape),
            Self::Normal { mean, std } => Tensor::normal_with_rng(*mean, *std, shape, rng),
            Self::Kaiming => {
                let (fan_in, _) = Self::fans(shape);
                let std = (2.0 / fan_in as f32).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
            Self::Xavier => {
                let (fan_in, fan_out) = Self::fans(shape);
                let std = (2.0 / (fan_in + fan_out) as f32).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
        }
    }

    fn fans(shape: &[usize]) -> (usize, usize) {
        match shape {
            [] => (1, 1),
            [n] => (*n, *n),
            [fan_in, fan_out] => (*fan_in, *fan_out),
            [out_c, in_c, rest @ ..] => {
                let receptive: usize = rest.iter().product();
                (in_c * receptive, out_c * receptive)
            }
        }
    }
}

// ==================== Var 结构 ====================

/// 变量句柄 - 携带图引用，像 PyTorch tensor 一样使用
///
/// # 使用示例
/// ```ignore
/// let graph = Graph::new();
/// let x = graph.input(&images)?;
/// let h = x.matmul(&w)?.try_add(&b)?.leaky_relu(0.2)?;
/// let loss = h.mse_loss(&target)?;
/// loss.backward()?;
/// ```
#[derive(Clone)]
pub struct Var {
    id: NodeId,
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    pub(in crate::nn) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    pub(in crate::nn) const fn graph(&self) -> &Rc<RefCell<GraphInner>> {
        &self.graph
    }

    /// 包装同一图中的另一个节点
    pub(in crate::nn) fn wrap(&self, id: NodeId) -> Self {
        Self::new(id, Rc::clone(&self.graph))
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    pub(in crate::nn) fn check_same_graph(&self, other: &Self, op: &str) -> Result<(), GraphError> {
        if self.same_graph(other) {
            Ok(())
        } else {
            Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Var 进行{op}"
            )))
        }
    }

    /// 获取 Var 所属的 Graph handle
    pub fn get_graph(&self) -> Graph {
        Graph::from_rc(Rc::clone(&self.graph))
    }

    // ==================== 梯度流控制 ====================

    /// 截断梯度流：返回一个值相同但不需要梯度的新 Var，原 Var 不受影响
    pub fn detach(&self) -> Result<Self, GraphError> {
        let id = self.graph.borrow_mut().new_identity_node(self.id, true)?;
        Ok(self.wrap(id))
    }

    pub fn is_detached(&self) -> Result<bool, GraphError> {
        self.graph.borrow().is_node_detached(self.id)
    }

    pub fn requires_grad(&self) -> Result<bool, GraphError> {
        self.graph.borrow().node_requires_grad(self.id)
    }

    // ==================== 执行 ====================

    /// 反向传播，返回 loss 的标量值。途经的中间节点的值随后被释放。
    pub fn backward(&self) -> Result<f32, GraphError> {
        self.graph.borrow_mut().backward(self.id)
    }

    /// 反向传播并保留中间节点的值
    pub fn backward_retain_graph(&self) -> Result<f32, GraphError> {
        self.graph.borrow_mut().backward_ex(self.id, true)
    }

    // ==================== 值访问和设置 ====================

    /// 获取节点的值（克隆的 Tensor），已释放时为 None
    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.cloned())
    }

    /// 获取节点的值，已释放时返回错误
    pub fn tensor(&self) -> Result<Tensor, GraphError> {
        self.value()?.ok_or_else(|| {
            GraphError::ComputationError(format!("节点{}的值已被释放", self.id))
        })
    }

    /// 设置叶子节点的值
    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, value)
    }

    /// 获取标量值
    pub fn item(&self) -> Result<f32, GraphError> {
        self.tensor()?
            .get_data_number()
            .ok_or_else(|| GraphError::InvalidOperation("Tensor 不是标量".to_string()))
    }

    pub fn shape(&self) -> Result<Vec<usize>, GraphError> {
        Ok(self.tensor()?.shape().to_vec())
    }

    /// 获取节点的梯度（只有参数节点会保存梯度）
    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_grad(self.id)?.cloned())
    }

    pub fn name(&self) -> Result<String, GraphError> {
        Ok(self.graph.borrow().get_node_name(self.id)?.to_string())
    }

    // ==================== 逐元素运算 ====================

    /// 加法（支持广播）
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "加法")?;
        let id = self.graph.borrow_mut().new_add_node(self.id, other.id)?;
        Ok(self.wrap(id))
    }

    /// 减法（支持广播）
    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "减法")?;
        let id = self.graph.borrow_mut().new_subtract_node(self.id, other.id)?;
        Ok(self.wrap(id))
    }

    /// 逐元素乘法（支持广播）
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "乘法")?;
        let id = self.graph.borrow_mut().new_multiply_node(self.id, other.id)?;
        Ok(self.wrap(id))
    }

    /// 与常数相乘
    pub fn mul_scalar(&self, scalar: f32) -> Result<Self, GraphError> {
        let constant = self.scalar_constant(scalar)?;
        self.try_mul(&constant)
    }

    /// 常数减去本变量：scalar - self
    pub fn rsub_scalar(&self, scalar: f32) -> Result<Self, GraphError> {
        self.scalar_constant(scalar)?.try_sub(self)
    }

    fn scalar_constant(&self, scalar: f32) -> Result<Self, GraphError> {
        let id = self
            .graph
            .borrow_mut()
            .new_input_node(&Tensor::full(scalar, &[1]), None)?;
        Ok(self.wrap(id))
    }
}
