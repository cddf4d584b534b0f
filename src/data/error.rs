//! 数据加载错误类型定义

use std::path::PathBuf;
use thiserror::Error;

use crate::errors::TensorError;

/// 数据加载相关错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 文件或目录未找到
    #[error("文件未找到: {0}")]
    FileNotFound(PathBuf),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 图像解码错误
    #[error("图像解码失败: {0}")]
    Image(#[from] image::ImageError),

    /// 形状不匹配
    #[error("形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// 数据集为空
    #[error("数据集为空: {0}")]
    Empty(String),

    /// 参数非法（如 batch_size 为 0）
    #[error("参数非法: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Tensor(#[from] TensorError),
}
