use super::super::{TraitNode, expect_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 改变形状，元素个数保持不变
pub(in crate::nn) struct Reshape {
    target_shape: Vec<usize>,
}

impl Reshape {
    pub(in crate::nn) fn new(parents: &[&Tensor], target_shape: &[usize]) -> Result<Self, GraphError> {
        expect_parents("Reshape", parents, 1)?;
        let size: usize = target_shape.iter().product();
        if size != parents[0].size() {
            return Err(GraphError::ShapeMismatch {
                expected: parents[0].shape().to_vec(),
                got: target_shape.to_vec(),
                message: "Reshape前后的元素个数必须一致".to_string(),
            });
        }
        Ok(Self {
            target_shape: target_shape.to_vec(),
        })
    }
}

impl TraitNode for Reshape {
    fn kind(&self) -> &'static str {
        "Reshape"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].reshape(&self.target_shape)?)
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.reshape(parents[0].shape())?)
    }
}
