//! 计算设备。
//! 设备请求字符串（"cpu"、"cuda"、"cuda:N"）解析为 Device，
//! 请求的加速设备不可用时自动回退到 CPU。

use std::fmt;
use std::str::FromStr;

use super::error::FdGanError;
use crate::tensor::Tensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Cpu,
    Cuda(usize),
}

impl Device {
    /// 本运行时是否带有 CUDA 后端
    pub const fn cuda_available() -> bool {
        false
    }

    /// 把请求的设备解析为实际可用的设备
    pub fn resolve(self) -> Self {
        match self {
            Self::Cuda(_) if !Self::cuda_available() => {
                tracing::warn!(requested = %self, "CUDA 不可用，回退到 CPU");
                Self::Cpu
            }
            device => device,
        }
    }

    /// 解析请求字符串并完成回退
    pub fn from_request(request: &str) -> Result<Self, FdGanError> {
        Ok(request.parse::<Self>()?.resolve())
    }

    pub const fn is_cpu(&self) -> bool {
        matches!(self, Self::Cpu)
    }

    /// 把张量放到本设备上
    pub fn place(&self, tensor: &Tensor) -> Result<Tensor, FdGanError> {
        match self {
            Self::Cpu => Ok(tensor.clone()),
            Self::Cuda(_) => Err(FdGanError::DeviceUnavailable(format!(
                "{self}（本运行时只支持 CPU 张量）"
            ))),
        }
    }
}

impl FromStr for Device {
    type Err = FdGanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let request = s.trim().to_ascii_lowercase();
        match request.as_str() {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda(0)),
            _ => request
                .strip_prefix("cuda:")
                .and_then(|index| index.parse::<usize>().ok())
                .map(Self::Cuda)
                .ok_or_else(|| FdGanError::DeviceUnavailable(format!("无法识别的设备：{s}"))),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda(index) => write!(f, "cuda:{index}"),
        }
    }
}
