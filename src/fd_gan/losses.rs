use super::config::GanMode;
use super::traits::AdversarialLoss;
use crate::nn::{GraphError, Var, VarLossOps};

/// 对抗损失。目标张量与预测同形状，真样本为 1、假样本为 0。
#[derive(Debug, Clone, Copy, Default)]
pub struct GanLoss {
    mode: GanMode,
}

impl GanLoss {
    pub const fn new(mode: GanMode) -> Self {
        Self { mode }
    }

    pub const fn mode(&self) -> GanMode {
        self.mode
    }
}

impl AdversarialLoss for GanLoss {
    fn forward(&self, prediction: &Var, is_real: bool) -> Result<Var, GraphError> {
        let label = if is_real { 1.0 } else { 0.0 };
        let target = prediction
            .get_graph()
            .constant(label, &prediction.shape()?)?;
        match self.mode {
            GanMode::Vanilla => prediction.bce_with_logits(&target),
            GanMode::LeastSquares => prediction.mse_loss(&target),
        }
    }
}
