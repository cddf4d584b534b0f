//! FD-GAN 训练器的错误类型

use thiserror::Error;

use crate::data::DataError;
use crate::nn::GraphError;

/// 训练器层面的错误，包装运行时与数据层的错误
#[derive(Debug, Error)]
pub enum FdGanError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// 配置文件解析失败
    #[error("配置解析失败: {0}")]
    Config(#[from] serde_json::Error),

    /// 配置取值非法
    #[error("配置非法: {0}")]
    InvalidConfig(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 无法识别或无法使用的设备
    #[error("设备不可用: {0}")]
    DeviceUnavailable(String),
}
