use super::super::{TraitNode, expect_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 全局均值，输出形状为[1, 1]
pub(in crate::nn) struct Mean;

impl Mean {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        expect_parents("Mean", parents, 1)?;
        if parents[0].size() == 0 {
            return Err(GraphError::InvalidOperation(
                "不能对空张量求均值".to_string(),
            ));
        }
        Ok(Self)
    }
}

impl TraitNode for Mean {
    fn kind(&self) -> &'static str {
        "Mean"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(Tensor::full(parents[0].mean_all(), &[1, 1]))
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let parent = parents[0];
        let scale = upstream_grad.sum_all() / parent.size() as f32;
        Ok(Tensor::full(scale, parent.shape()))
    }
}
