//! Conv2d (二维卷积) 层

use crate::nn::{Graph, GraphError, Init, Module, Var, VarMatrixOps};

/// 二维卷积层：`output = conv2d(x, K) + b`
///
/// # 输入/输出形状
/// - 输入：[batch, in_channels, H, W]
/// - 输出：[batch, out_channels, H', W']
///
/// 偏置形状为[1, out_channels, 1, 1]，借助广播加到每个空间位置。
pub struct Conv2d {
    kernel: Var,
    bias: Option<Var>,
    stride: (usize, usize),
    padding: (usize, usize),
}

impl Conv2d {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        graph: &Graph,
        in_channels: usize,
        out_channels: usize,
        kernel_size: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
        use_bias: bool,
        name: &str,
    ) -> Result<Self, GraphError> {
        let kernel = graph.parameter(
            &[out_channels, in_channels, kernel_size.0, kernel_size.1],
            Init::Kaiming,
            &format!("{name}_K"),
        )?;
        let bias = if use_bias {
            Some(graph.parameter(&[1, out_channels, 1, 1], Init::Zeros, &format!("{name}_b"))?)
        } else {
            None
        };
        Ok(Self {
            kernel,
            bias,
            stride,
            padding,
        })
    }

    /// 3×3 卷积、步长 1、填充 1（保持空间尺寸）的常用配置
    pub fn same_3x3(
        graph: &Graph,
        in_channels: usize,
        out_channels: usize,
        name: &str,
    ) -> Result<Self, GraphError> {
        Self::new(graph, in_channels, out_channels, (3, 3), (1, 1), (1, 1), true, name)
    }

    pub fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let output = x.conv2d(&self.kernel, self.stride, self.padding)?;
        match &self.bias {
            Some(bias) => output.try_add(bias),
            None => Ok(output),
        }
    }

    pub const fn kernel(&self) -> &Var {
        &self.kernel
    }
}

impl Module for Conv2d {
    fn parameters(&self) -> Vec<Var> {
        let mut params = vec![self.kernel.clone()];
        if let Some(bias) = &self.bias {
            params.push(bias.clone());
        }
        params
    }
}
