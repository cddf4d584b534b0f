//! 合成的成对图像数据集
//!
//! 每个样本是一组随机频率与相位的正弦条纹：source 与 reference 使用相同的频率、
//! 不同的相位，像素值位于[-1, 1]。固定种子时结果可复现。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::dataloader::PairedDataset;
use crate::data::error::DataError;
use crate::tensor::Tensor;

#[derive(Debug, Clone)]
pub struct SyntheticPairs {
    len: usize,
    channels: usize,
    height: usize,
    width: usize,
    seed: u64,
}

impl SyntheticPairs {
    pub const fn new(len: usize, channels: usize, height: usize, width: usize) -> Self {
        Self {
            len,
            channels,
            height,
            width,
            seed: 0,
        }
    }

    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// 生成形状为`[len, channels, height, width]`的数据集
    pub fn generate(&self) -> Result<PairedDataset, DataError> {
        if self.len == 0 || self.channels == 0 || self.height == 0 || self.width == 0 {
            return Err(DataError::Empty(format!(
                "合成数据集的尺寸不能为 0：len={}, channels={}, height={}, width={}",
                self.len, self.channels, self.height, self.width
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let plane = self.height * self.width;
        let sample_size = self.channels * plane;
        let mut sources = Vec::with_capacity(self.len * sample_size);
        let mut references = Vec::with_capacity(self.len * sample_size);

        for _ in 0..self.len {
            let freq_y: f32 = rng.gen_range(0.2..1.2);
            let freq_x: f32 = rng.gen_range(0.2..1.2);
            for _ in 0..self.channels {
                let source_phase: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
                let reference_phase: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
                for i in 0..plane {
                    let (y, x) = ((i / self.width) as f32, (i % self.width) as f32);
                    let angle = freq_y * y + freq_x * x;
                    sources.push(0.9 * (angle + source_phase).sin());
                    references.push(0.9 * (angle + reference_phase).sin());
                }
            }
        }

        let shape = [self.len, self.channels, self.height, self.width];
        PairedDataset::new(Tensor::try_new(&sources, &shape)?, Tensor::try_new(&references, &shape)?)
    }
}
