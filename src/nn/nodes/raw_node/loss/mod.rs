mod bce_with_logits;
mod mse_loss;

pub(in crate::nn) use bce_with_logits::BceWithLogitsLoss;
pub(in crate::nn) use mse_loss::MseLoss;

use super::expect_parents;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 损失节点的预测与目标必须形状一致且非空
fn check_pair(kind: &str, parents: &[&Tensor]) -> Result<(), GraphError> {
    expect_parents(kind, parents, 2)?;
    let (prediction, target) = (parents[0], parents[1]);
    if prediction.shape() != target.shape() {
        return Err(GraphError::ShapeMismatch {
            expected: prediction.shape().to_vec(),
            got: target.shape().to_vec(),
            message: format!("{kind}的预测值与目标值形状必须一致"),
        });
    }
    if prediction.size() == 0 {
        return Err(GraphError::InvalidOperation(format!(
            "{kind}的输入不能为空张量"
        )));
    }
    Ok(())
}
