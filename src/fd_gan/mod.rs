//! FD-GAN：双生成器 + 空间域/频域判别器的对抗训练
//!
//! - [`FdGanTrainer`]: 训练步编排与 epoch 循环，持有两个 Adam 优化器
//! - [`BlendGenerator`] / [`TransferGenerator`]: 生成器
//! - [`Discriminator`]: 同时输出空间域与频域 logit 的判别器
//! - [`GanLoss`]: 对抗损失（BCE 或最小二乘）
//! - [`TrainerConfig`]: 训练配置，可从 JSON 读取
//! - [`Device`]: 设备请求与 CPU 回退

pub mod config;
pub mod device;
mod discriminator;
pub mod error;
mod generators;
mod losses;
mod trainer;
pub mod traits;

#[cfg(test)]
mod tests;

pub use config::{GanMode, TrainerConfig};
pub use device::Device;
pub use discriminator::Discriminator;
pub use error::FdGanError;
pub use generators::{BlendGenerator, TransferGenerator};
pub use losses::GanLoss;
pub use trainer::{FdGanTrainer, StepLosses, TrainReport};
pub use traits::{AdversarialLoss, ImageBlender, ImageCritic, ImageTransfer};
