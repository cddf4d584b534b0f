use super::super::{TraitNode, expect_parents};
use super::check_broadcast;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素乘法（Hadamard 积，支持广播）
///
/// backward: d(a⊙b)/da = upstream ⊙ b，再还原到 a 的形状
pub(in crate::nn) struct Multiply;

impl Multiply {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        expect_parents("Multiply", parents, 2)?;
        check_broadcast("Multiply", parents[0], parents[1])?;
        Ok(Self)
    }
}

impl TraitNode for Multiply {
    fn kind(&self) -> &'static str {
        "Multiply"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] * parents[1])
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let other = parents[1 - parent_index];
        let grad = upstream_grad * other;
        Ok(grad.sum_to_shape(parents[parent_index].shape())?)
    }
}
