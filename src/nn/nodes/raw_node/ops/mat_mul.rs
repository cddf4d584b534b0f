use super::super::{TraitNode, expect_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 矩阵乘法 C = A @ B
///
/// backward: dA = G @ Bᵀ，dB = Aᵀ @ G
pub(in crate::nn) struct MatMul;

impl MatMul {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        expect_parents("MatMul", parents, 2)?;
        let (a, b) = (parents[0], parents[1]);
        if a.dimension() != 2 || b.dimension() != 2 || a.shape()[1] != b.shape()[0] {
            return Err(GraphError::ShapeMismatch {
                expected: a.shape().to_vec(),
                got: b.shape().to_vec(),
                message: "MatMul节点要求[m, k] @ [k, n]".to_string(),
            });
        }
        Ok(Self)
    }
}

impl TraitNode for MatMul {
    fn kind(&self) -> &'static str {
        "MatMul"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].mat_mul(parents[1])?)
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if parent_index == 0 {
            Ok(upstream_grad.mat_mul(&parents[1].transpose()?)?)
        } else {
            Ok(parents[0].transpose()?.mat_mul(upstream_grad)?)
        }
    }
}
