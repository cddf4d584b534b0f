//! 空间域 + 频域判别器
//!
//! 空间分支：两层步长为 2 的卷积后接 1 通道卷积头，全局平均池化为每张图一个 logit。
//! 频域分支：先对每个通道做二维正交 DCT，再经过同样结构的卷积得到 logit。

use crate::nn::{
    Conv2d, Graph, GraphError, Module, Var, VarActivationOps, VarFrequencyOps, VarMatrixOps,
    VarShapeOps,
};

use super::generators::check_image;
use super::traits::ImageCritic;

const LEAKY_SLOPE: f32 = 0.2;

/// 一条卷积分支：down1 → down2 → head
struct Branch {
    down1: Conv2d,
    down2: Conv2d,
    head: Conv2d,
}

impl Branch {
    fn new(graph: &Graph, channels: usize, width: usize, name: &str) -> Result<Self, GraphError> {
        let down = |in_c, out_c, suffix: &str| {
            Conv2d::new(graph, in_c, out_c, (3, 3), (2, 2), (1, 1), true, &format!("{name}_{suffix}"))
        };
        Ok(Self {
            down1: down(channels, width, "down1")?,
            down2: down(width, 2 * width, "down2")?,
            head: Conv2d::same_3x3(graph, 2 * width, 1, &format!("{name}_head"))?,
        })
    }

    fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let h = self.down1.forward(x)?.leaky_relu(LEAKY_SLOPE)?;
        let h = self.down2.forward(&h)?.leaky_relu(LEAKY_SLOPE)?;
        global_average_pool(&self.head.forward(&h)?)
    }

    fn parameters(&self) -> Vec<Var> {
        [&self.down1, &self.down2, &self.head]
            .iter()
            .flat_map(|layer| layer.parameters())
            .collect()
    }
}

/// `[batch, C, H, W]` → `[batch, 1]`：对每个样本的所有元素取均值
fn global_average_pool(x: &Var) -> Result<Var, GraphError> {
    let flat = x.flatten()?;
    let features = flat.shape()?[1];
    let weights = x
        .get_graph()
        .constant(1.0 / features as f32, &[features, 1])?;
    flat.matmul(&weights)
}

pub struct Discriminator {
    channels: usize,
    spatial: Branch,
    frequency: Branch,
}

impl Discriminator {
    pub fn new(graph: &Graph, channels: usize, width: usize, name: &str) -> Result<Self, GraphError> {
        Ok(Self {
            channels,
            spatial: Branch::new(graph, channels, width, &format!("{name}_spatial"))?,
            frequency: Branch::new(graph, channels, width, &format!("{name}_freq"))?,
        })
    }
}

impl ImageCritic for Discriminator {
    fn critique(&self, image: &Var) -> Result<(Var, Var), GraphError> {
        check_image("image", image, self.channels, None)?;
        let spatial = self.spatial.forward(image)?;
        let frequency = self.frequency.forward(&image.dct2d()?)?;
        Ok((spatial, frequency))
    }
}

impl Module for Discriminator {
    fn parameters(&self) -> Vec<Var> {
        let mut params = self.spatial.parameters();
        params.extend(self.frequency.parameters());
        params
    }
}
