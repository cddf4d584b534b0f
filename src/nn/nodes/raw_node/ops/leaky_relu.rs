use super::super::{TraitNode, expect_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// LeakyReLU：x > 0 时为 x，否则为 alpha·x
pub(in crate::nn) struct LeakyRelu {
    alpha: f32,
}

impl LeakyRelu {
    pub(in crate::nn) fn new(parents: &[&Tensor], alpha: f32) -> Result<Self, GraphError> {
        expect_parents("LeakyRelu", parents, 1)?;
        if !(0.0..1.0).contains(&alpha) {
            return Err(GraphError::InvalidOperation(format!(
                "LeakyRelu的alpha须在[0, 1)内，实际为{alpha}"
            )));
        }
        Ok(Self { alpha })
    }
}

impl TraitNode for LeakyRelu {
    fn kind(&self) -> &'static str {
        "LeakyRelu"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].leaky_relu(self.alpha))
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let alpha = self.alpha;
        let slope = parents[0].map(|x| if x > 0.0 { 1.0 } else { alpha });
        Ok(upstream_grad * &slope)
    }
}
