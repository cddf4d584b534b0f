use super::super::TraitNode;
use super::check_pair;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 带 logits 的二元交叉熵（均值归约），输出形状[1, 1]
///
/// 数值稳定形式：loss = mean(max(x, 0) - x·y + ln(1 + e^(-|x|)))
/// backward: d/dx = (sigmoid(x) - y) / N，d/dy = -x / N
pub(in crate::nn) struct BceWithLogitsLoss;

impl BceWithLogitsLoss {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        check_pair("BceWithLogitsLoss", parents)?;
        Ok(Self)
    }
}

impl TraitNode for BceWithLogitsLoss {
    fn kind(&self) -> &'static str {
        "BceWithLogitsLoss"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let (logits, target) = (parents[0], parents[1]);
        let elementwise = logits.zip_map(target, |x, y| {
            x.max(0.0) - x * y + (-x.abs()).exp().ln_1p()
        })?;
        Ok(Tensor::full(elementwise.mean_all(), &[1, 1]))
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let (logits, target) = (parents[0], parents[1]);
        let scale = upstream_grad.sum_all() / logits.size() as f32;
        if parent_index == 0 {
            Ok(&(&logits.sigmoid() - target) * scale)
        } else {
            Ok(logits * (-scale))
        }
    }
}
