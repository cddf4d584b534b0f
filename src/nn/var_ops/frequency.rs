use crate::nn::{GraphError, Var};

/// 频域变换扩展 trait
pub trait VarFrequencyOps {
    /// 对[batch, channels, height, width]的每个通道做正交二维 DCT-II
    fn dct2d(&self) -> Result<Var, GraphError>;
}

impl VarFrequencyOps for Var {
    fn dct2d(&self) -> Result<Var, GraphError> {
        let id = self.graph().borrow_mut().new_dct2d_node(self.node_id())?;
        Ok(self.wrap(id))
    }
}
