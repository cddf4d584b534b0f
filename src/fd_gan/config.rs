//! 训练器配置（serde + JSON）
//!
//! 所有字段都有默认值，JSON 中只需给出要覆盖的字段。

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::FdGanError;

/// 对抗损失的形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GanMode {
    /// logits 上的二元交叉熵
    #[default]
    Vanilla,
    /// 对 1/0 目标的均方误差（LSGAN）
    LeastSquares,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// 设备请求："cpu"、"cuda"或"cuda:N"，不可用时回退到 CPU
    pub device: String,
    /// 计算图随机数种子（参数初始化与噪声）
    pub seed: u64,
    pub learning_rate: f32,
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
    /// 图像通道数
    pub channels: usize,
    /// 生成器隐藏层通道数
    pub generator_width: usize,
    /// 判别器第一层通道数
    pub discriminator_width: usize,
    pub gan_mode: GanMode,
    /// 每隔多少步打印一次训练进度
    pub log_every: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            device: "cuda".to_string(),
            seed: 42,
            learning_rate: 0.0002,
            beta1: 0.5,
            beta2: 0.999,
            epsilon: 1e-8,
            channels: 3,
            generator_width: 16,
            discriminator_width: 16,
            gan_mode: GanMode::Vanilla,
            log_every: 10,
        }
    }
}

impl TrainerConfig {
    pub fn from_json(json: &str) -> Result<Self, FdGanError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FdGanError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, FdGanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 检查各字段的取值范围
    pub fn validate(&self) -> Result<(), FdGanError> {
        let invalid = |message: String| Err(FdGanError::InvalidConfig(message));
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return invalid(format!("learning_rate 必须为正数，得到{}", self.learning_rate));
        }
        for (name, beta) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&beta) {
                return invalid(format!("{name}必须位于[0, 1)，得到{beta}"));
            }
        }
        if self.epsilon <= 0.0 {
            return invalid(format!("epsilon 必须为正数，得到{}", self.epsilon));
        }
        if self.channels == 0 || self.generator_width == 0 || self.discriminator_width == 0 {
            return invalid("channels、generator_width、discriminator_width 都必须大于 0".to_string());
        }
        if self.log_every == 0 {
            return invalid("log_every 必须大于 0".to_string());
        }
        Ok(())
    }
}
