//! Var 激活函数扩展 trait

use crate::nn::{GraphError, Var};

/// 激活函数扩展 trait
///
/// ```ignore
/// use fd_gan::nn::{Var, VarActivationOps};
///
/// let h = x.leaky_relu(0.2)?;
/// let mask = logits.sigmoid()?;
/// ```
pub trait VarActivationOps {
    /// Sigmoid 激活：1 / (1 + exp(-x))
    fn sigmoid(&self) -> Result<Var, GraphError>;

    /// Tanh 激活
    fn tanh(&self) -> Result<Var, GraphError>;

    /// `LeakyReLU` 激活：x if x > 0 else alpha * x
    fn leaky_relu(&self, alpha: f32) -> Result<Var, GraphError>;
}

impl VarActivationOps for Var {
    fn sigmoid(&self) -> Result<Var, GraphError> {
        let id = self.graph().borrow_mut().new_sigmoid_node(self.node_id())?;
        Ok(self.wrap(id))
    }

    fn tanh(&self) -> Result<Var, GraphError> {
        let id = self.graph().borrow_mut().new_tanh_node(self.node_id())?;
        Ok(self.wrap(id))
    }

    fn leaky_relu(&self, alpha: f32) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_leaky_relu_node(self.node_id(), alpha)?;
        Ok(self.wrap(id))
    }
}
