//! 训练器与网络之间的能力边界。
//! 训练器只依赖这些 trait，具体网络结构可以替换（见`FdGanTrainer::with_models`）。

use crate::nn::{GraphError, Module, Var};

/// 由噪声与一对图像合成新图像
pub trait ImageBlender: Module {
    /// 返回`(合成图像, 辅助输出)`，合成图像与`source`形状相同
    fn blend(&self, noise: &Var, source: &Var, reference: &Var) -> Result<(Var, Var), GraphError>;
}

/// 把 reference 的风格迁移到 source 上
pub trait ImageTransfer: Module {
    fn transfer(&self, source: &Var, reference: &Var) -> Result<Var, GraphError>;
}

/// 判别器：同时在空间域与频域给出真/假的 logit
pub trait ImageCritic: Module {
    /// 返回`(空间域 logit, 频域 logit)`，形状均为`[batch, 1]`
    fn critique(&self, image: &Var) -> Result<(Var, Var), GraphError>;
}

/// 对抗损失：由判别器输出与真/假标签得到标量损失
pub trait AdversarialLoss {
    fn forward(&self, prediction: &Var, is_real: bool) -> Result<Var, GraphError>;
}
