mod config;
mod device;
mod losses;
mod networks;

use crate::fd_gan::TrainerConfig;

/// 小尺寸网络的测试配置
fn small_config() -> TrainerConfig {
    TrainerConfig {
        device: "cpu".to_string(),
        seed: 7,
        channels: 1,
        generator_width: 4,
        discriminator_width: 4,
        ..TrainerConfig::default()
    }
}
