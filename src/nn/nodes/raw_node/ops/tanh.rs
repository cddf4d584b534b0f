use super::super::{TraitNode, expect_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Tanh 激活函数节点，backward: 1 - tanh²(x)
pub(in crate::nn) struct Tanh;

impl Tanh {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        expect_parents("Tanh", parents, 1)?;
        Ok(Self)
    }
}

impl TraitNode for Tanh {
    fn kind(&self) -> &'static str {
        "Tanh"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].tanh())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad * &(1.0 - &value.square()))
    }
}
