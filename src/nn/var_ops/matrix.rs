//! Var 矩阵运算与卷积扩展 trait

use crate::nn::{GraphError, Var};

pub trait VarMatrixOps {
    /// 矩阵乘法：[m, k] @ [k, n] = [m, n]
    fn matmul(&self, other: &Var) -> Result<Var, GraphError>;

    /// 2D 卷积：self 为[batch, C_in, H, W]，kernel 为[C_out, C_in, kH, kW]
    fn conv2d(
        &self,
        kernel: &Var,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Var, GraphError>;
}

impl VarMatrixOps for Var {
    fn matmul(&self, other: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(other, "矩阵乘法")?;
        let id = self
            .graph()
            .borrow_mut()
            .new_mat_mul_node(self.node_id(), other.node_id())?;
        Ok(self.wrap(id))
    }

    fn conv2d(
        &self,
        kernel: &Var,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Var, GraphError> {
        self.check_same_graph(kernel, "卷积")?;
        let id = self.graph().borrow_mut().new_conv2d_node(
            self.node_id(),
            kernel.node_id(),
            stride,
            padding,
        )?;
        Ok(self.wrap(id))
    }
}
