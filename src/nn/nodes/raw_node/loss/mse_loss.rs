use super::super::TraitNode;
use super::check_pair;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 均方误差（均值归约），输出形状[1, 1]
///
/// backward: d/dpred = 2·(pred - target) / N，对目标的梯度取相反数
pub(in crate::nn) struct MseLoss;

impl MseLoss {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        check_pair("MseLoss", parents)?;
        Ok(Self)
    }
}

impl TraitNode for MseLoss {
    fn kind(&self) -> &'static str {
        "MseLoss"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let diff = parents[0] - parents[1];
        Ok(Tensor::full(diff.square().mean_all(), &[1, 1]))
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let scale = 2.0 * upstream_grad.sum_all() / parents[0].size() as f32;
        let grad = &(parents[0] - parents[1]) * scale;
        Ok(if parent_index == 0 { grad } else { -grad })
    }
}
