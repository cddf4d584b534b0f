//! 图像与张量之间的变换
//!
//! 图像数据统一缩放到固定尺寸，并把像素值映射到[-1, 1]。

use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;

use crate::data::error::DataError;
use crate::tensor::Tensor;

/// 将图像缩放到`size`=(height, width)并转换为`[channels, height, width]`张量
pub fn image_to_tensor(
    image: &DynamicImage,
    size: (u32, u32),
    channels: usize,
) -> Result<Tensor, DataError> {
    let (height, width) = size;
    let resized = if image.height() == height && image.width() == width {
        image.clone()
    } else {
        image.resize_exact(width, height, FilterType::Triangle)
    };
    Ok(Tensor::from_image(&resized, channels)?)
}

/// 读取并转换单张图像
pub fn load_image(path: &Path, size: (u32, u32), channels: usize) -> Result<Tensor, DataError> {
    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }
    let image = image::open(path)?;
    image_to_tensor(&image, size, channels)
}

/// 把批次张量`[N, C, H, W]`中的第`index`个样本保存为图像文件（格式由扩展名决定）
pub fn save_sample(batch: &Tensor, index: usize, path: &Path) -> Result<(), DataError> {
    if batch.dimension() != 4 {
        return Err(DataError::ShapeMismatch {
            expected: vec![0, 0, 0, 0],
            got: batch.shape().to_vec(),
        });
    }
    let sample = batch.sample_at(index)?.reshape(&batch.shape()[1..])?;
    sample.to_image()?.save(path)?;
    Ok(())
}
