use super::super::{TraitNode, expect_parents};
use super::check_broadcast;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素加法（支持广播）
///
/// backward: 上游梯度经 sum_to_shape 还原到各父节点形状
pub(in crate::nn) struct Add;

impl Add {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        expect_parents("Add", parents, 2)?;
        check_broadcast("Add", parents[0], parents[1])?;
        Ok(Self)
    }
}

impl TraitNode for Add {
    fn kind(&self) -> &'static str {
        "Add"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] + parents[1])
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.sum_to_shape(parents[parent_index].shape())?)
    }
}
