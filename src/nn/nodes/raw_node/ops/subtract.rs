use super::super::{TraitNode, expect_parents};
use super::check_broadcast;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素减法 a - b（支持广播）
pub(in crate::nn) struct Subtract;

impl Subtract {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        expect_parents("Subtract", parents, 2)?;
        check_broadcast("Subtract", parents[0], parents[1])?;
        Ok(Self)
    }
}

impl TraitNode for Subtract {
    fn kind(&self) -> &'static str {
        "Subtract"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] - parents[1])
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let grad = upstream_grad.sum_to_shape(parents[parent_index].shape())?;
        Ok(if parent_index == 0 { grad } else { -grad })
    }
}
