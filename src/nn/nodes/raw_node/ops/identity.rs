use super::super::{TraitNode, expect_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 恒等节点。`detach`通过创建一个不需要梯度的恒等节点实现，
/// 原节点保持可求导，后续仍可被其他计算使用。
pub(in crate::nn) struct Identity;

impl Identity {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        expect_parents("Identity", parents, 1)?;
        Ok(Self)
    }
}

impl TraitNode for Identity {
    fn kind(&self) -> &'static str {
        "Identity"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].clone())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.clone())
    }
}
