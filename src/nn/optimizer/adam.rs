use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::Optimizer;
use crate::nn::graph::GraphInner;
use crate::nn::{Graph, GraphError, NodeId, Var};
use crate::tensor::Tensor;

/// Adam 优化器
///
/// m = β1·m + (1-β1)·g，v = β2·v + (1-β2)·g²，
/// θ = θ - lr · m̂ / (√v̂ + ε)，其中 m̂、v̂ 为偏差修正后的矩估计。
/// 矩估计在优化器的整个生命周期内保留。
pub struct Adam {
    graph: Rc<RefCell<GraphInner>>,
    params: Vec<NodeId>,
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    m: HashMap<NodeId, Tensor>,
    v: HashMap<NodeId, Tensor>,
    t: u32,
}

impl Adam {
    /// 使用默认超参数（β1=0.9，β2=0.999，ε=1e-8）
    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Self {
        Self::with_config(graph, params, lr, 0.9, 0.999, 1e-8)
    }

    pub fn with_config(
        graph: &Graph,
        params: &[Var],
        lr: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    ) -> Self {
        Self {
            graph: graph.inner_rc(),
            params: params.iter().map(Var::node_id).collect(),
            lr,
            beta1,
            beta2,
            epsilon,
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        }
    }

    pub const fn betas(&self) -> (f32, f32) {
        (self.beta1, self.beta2)
    }

    /// 已执行的 step 次数
    pub const fn steps(&self) -> u32 {
        self.t
    }

    pub fn num_params(&self) -> usize {
        self.params.len()
    }
}

impl Optimizer for Adam {
    fn zero_grad(&mut self) -> Result<(), GraphError> {
        let mut g = self.graph.borrow_mut();
        for &node_id in &self.params {
            g.clear_node_grad(node_id)?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), GraphError> {
        self.t += 1;
        let mut g = self.graph.borrow_mut();
        let bias_correction1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias_correction2 = 1.0 - self.beta2.powi(self.t as i32);

        for &node_id in &self.params {
            let Some(grad) = g.get_node_grad(node_id)?.cloned() else {
                continue;
            };
            let current = g.get_node_value(node_id)?.ok_or_else(|| {
                GraphError::ComputationError(format!("参数节点{node_id}没有值"))
            })?;

            // 更新一阶矩
            let m = self
                .m
                .entry(node_id)
                .or_insert_with(|| Tensor::zeros(grad.shape()));
            *m *= self.beta1;
            *m += &(&grad * (1.0 - self.beta1));

            // 更新二阶矩
            let v = self
                .v
                .entry(node_id)
                .or_insert_with(|| Tensor::zeros(grad.shape()));
            *v *= self.beta2;
            *v += &(&grad.square() * (1.0 - self.beta2));

            // 偏差修正
            let m_hat = &*m / bias_correction1;
            let v_hat = &*v / bias_correction2;

            let denom = &v_hat.sqrt() + self.epsilon;
            let update = &m_hat / &denom;
            let new_value = current - &(&update * self.lr);

            g.set_node_value(node_id, &new_value)?;
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.t = 0;
    }
}
