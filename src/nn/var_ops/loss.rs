//! Var 损失函数扩展 trait

use crate::nn::{GraphError, Var};

/// 损失函数扩展 trait，均返回形状为[1, 1]的标量 Var
pub trait VarLossOps {
    /// 带 logits 的二元交叉熵（均值归约）
    fn bce_with_logits(&self, target: &Var) -> Result<Var, GraphError>;

    /// 均方误差（均值归约）
    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError>;
}

impl VarLossOps for Var {
    fn bce_with_logits(&self, target: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(target, "BCE 损失计算")?;
        let id = self
            .graph()
            .borrow_mut()
            .new_bce_with_logits_loss_node(self.node_id(), target.node_id())?;
        Ok(self.wrap(id))
    }

    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(target, "MSE 损失计算")?;
        let id = self
            .graph()
            .borrow_mut()
            .new_mse_loss_node(self.node_id(), target.node_id())?;
        Ok(self.wrap(id))
    }
}
