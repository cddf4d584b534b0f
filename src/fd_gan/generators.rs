//! 两个生成器
//!
//! BlendGenerator：noise、source、reference 沿通道拼接后经过卷积主干，
//! 输出合成图像 synth（tanh）与单通道融合掩码 mask（sigmoid），
//! fake = mask · synth + (1 - mask) · reference，辅助输出为 mask。
//! TransferGenerator：source 与 reference 拼接后直接输出风格迁移后的图像（tanh）。

use crate::nn::{Conv2d, Graph, GraphError, Module, Var, VarActivationOps, VarShapeOps};

use super::traits::{ImageBlender, ImageTransfer};

const LEAKY_SLOPE: f32 = 0.2;

/// 检查输入是否为`[batch, channels, H, W]`且与`expected`形状一致
pub(crate) fn check_image(
    name: &str,
    image: &Var,
    channels: usize,
    expected: Option<&[usize]>,
) -> Result<Vec<usize>, GraphError> {
    let shape = image.shape()?;
    if shape.len() != 4 || shape[1] != channels {
        return Err(GraphError::ShapeMismatch {
            expected: vec![shape.first().copied().unwrap_or(0), channels, 0, 0],
            got: shape,
            message: format!("{name}必须是通道数为{channels}的[batch, C, H, W]图像"),
        });
    }
    if let Some(expected) = expected {
        if shape != expected {
            return Err(GraphError::ShapeMismatch {
                expected: expected.to_vec(),
                got: shape,
                message: format!("{name}的形状必须与 source 一致"),
            });
        }
    }
    Ok(shape)
}

pub struct BlendGenerator {
    channels: usize,
    stem: Conv2d,
    body: Conv2d,
    synth_head: Conv2d,
    mask_head: Conv2d,
}

impl BlendGenerator {
    /// 参数名以`name`为前缀，例如`blend_stem_K`
    pub fn new(graph: &Graph, channels: usize, width: usize, name: &str) -> Result<Self, GraphError> {
        Ok(Self {
            channels,
            stem: Conv2d::same_3x3(graph, 3 * channels, width, &format!("{name}_stem"))?,
            body: Conv2d::same_3x3(graph, width, width, &format!("{name}_body"))?,
            synth_head: Conv2d::same_3x3(graph, width, channels, &format!("{name}_synth"))?,
            mask_head: Conv2d::same_3x3(graph, width, 1, &format!("{name}_mask"))?,
        })
    }

    pub const fn channels(&self) -> usize {
        self.channels
    }
}

impl ImageBlender for BlendGenerator {
    fn blend(&self, noise: &Var, source: &Var, reference: &Var) -> Result<(Var, Var), GraphError> {
        let shape = check_image("source", source, self.channels, None)?;
        check_image("reference", reference, self.channels, Some(&shape))?;
        check_image("noise", noise, self.channels, Some(&shape))?;

        let x = noise.concat(&[source, reference], 1)?;
        let h = self.stem.forward(&x)?.leaky_relu(LEAKY_SLOPE)?;
        let h = self.body.forward(&h)?.leaky_relu(LEAKY_SLOPE)?;
        let synth = self.synth_head.forward(&h)?.tanh()?;
        let mask = self.mask_head.forward(&h)?.sigmoid()?;

        // mask 为[batch, 1, H, W]，沿通道广播
        let kept = mask.rsub_scalar(1.0)?.try_mul(reference)?;
        let fake = mask.try_mul(&synth)?.try_add(&kept)?;
        Ok((fake, mask))
    }
}

impl Module for BlendGenerator {
    fn parameters(&self) -> Vec<Var> {
        [&self.stem, &self.body, &self.synth_head, &self.mask_head]
            .iter()
            .flat_map(|layer| layer.parameters())
            .collect()
    }
}

pub struct TransferGenerator {
    channels: usize,
    encoder: Conv2d,
    decoder: Conv2d,
}

impl TransferGenerator {
    pub fn new(graph: &Graph, channels: usize, width: usize, name: &str) -> Result<Self, GraphError> {
        Ok(Self {
            channels,
            encoder: Conv2d::same_3x3(graph, 2 * channels, width, &format!("{name}_enc"))?,
            decoder: Conv2d::same_3x3(graph, width, channels, &format!("{name}_dec"))?,
        })
    }
}

impl ImageTransfer for TransferGenerator {
    fn transfer(&self, source: &Var, reference: &Var) -> Result<Var, GraphError> {
        let shape = check_image("source", source, self.channels, None)?;
        check_image("reference", reference, self.channels, Some(&shape))?;

        let x = source.concat(&[reference], 1)?;
        let h = self.encoder.forward(&x)?.leaky_relu(LEAKY_SLOPE)?;
        self.decoder.forward(&h)?.tanh()
    }
}

impl Module for TransferGenerator {
    fn parameters(&self) -> Vec<Var> {
        let mut params = self.encoder.parameters();
        params.extend(self.decoder.parameters());
        params
    }
}
