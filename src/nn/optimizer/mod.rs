//! 优化器（PyTorch 风格）
//!
//! - 优化器持有 Rc<RefCell<GraphInner>> 引用，只更新自己绑定的参数
//! - zero_grad() 与 step() 不需要 &mut Graph 参数

mod adam;

pub use adam::Adam;

use crate::nn::{GraphError, Var};

/// 优化器 trait
///
/// ```ignore
/// let mut optimizer = Adam::new(&graph, &model.parameters(), 0.001);
/// optimizer.zero_grad()?;
/// loss.backward()?;
/// optimizer.step()?;
/// ```
pub trait Optimizer {
    /// 清除绑定参数的梯度
    fn zero_grad(&mut self) -> Result<(), GraphError>;

    /// 更新绑定的参数；没有梯度的参数保持不变
    fn step(&mut self) -> Result<(), GraphError>;

    /// 一步完成：zero_grad + backward + step，返回 loss 的标量值
    fn minimize(&mut self, loss: &Var) -> Result<f32, GraphError> {
        self.zero_grad()?;
        let loss_val = loss.backward()?;
        self.step()?;
        Ok(loss_val)
    }

    fn learning_rate(&self) -> f32;

    fn set_learning_rate(&mut self, lr: f32);

    /// 重置累积状态（如 Adam 的动量）
    fn reset(&mut self);
}
