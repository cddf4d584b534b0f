//! Var 形状变换扩展 trait

use crate::nn::{GraphError, Var};

pub trait VarShapeOps {
    fn reshape(&self, shape: &[usize]) -> Result<Var, GraphError>;

    /// 保留第0维（batch），其余维度展平：[batch, ...] -> [batch, n]
    fn flatten(&self) -> Result<Var, GraphError>;

    /// 沿`axis`与`others`依次拼接：[self, others...]
    fn concat(&self, others: &[&Var], axis: usize) -> Result<Var, GraphError>;
}

impl VarShapeOps for Var {
    fn reshape(&self, shape: &[usize]) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_reshape_node(self.node_id(), shape)?;
        Ok(self.wrap(id))
    }

    fn flatten(&self) -> Result<Var, GraphError> {
        let shape = self.shape()?;
        let batch = shape.first().copied().unwrap_or(1);
        let rest: usize = shape.iter().skip(1).product();
        self.reshape(&[batch, rest])
    }

    fn concat(&self, others: &[&Var], axis: usize) -> Result<Var, GraphError> {
        for other in others {
            self.check_same_graph(other, "拼接")?;
        }
        let ids: Vec<_> = std::iter::once(self.node_id())
            .chain(others.iter().map(|v| v.node_id()))
            .collect();
        let id = self.graph().borrow_mut().new_concat_node(&ids, axis)?;
        Ok(self.wrap(id))
    }
}
