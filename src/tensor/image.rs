//! 张量与 image 库图像之间的互相转换。
//! 图像张量布局为[channels, height, width]，像素值线性映射到[-1, 1]。

use super::Tensor;
use crate::errors::TensorError;
use image::{DynamicImage, GrayImage, RgbImage};

impl Tensor {
    /// 将图像转换为`[channels, height, width]`张量（channels 只能为 1 或 3）
    pub fn from_image(image: &DynamicImage, channels: usize) -> Result<Tensor, TensorError> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let raw: Vec<u8> = match channels {
            1 => image.to_luma8().into_raw(),
            3 => image.to_rgb8().into_raw(),
            _ => return Err(TensorError::IncompatibleShape),
        };

        // image 库的像素按 [H, W, C] 交错存储，这里转为 [C, H, W]
        let mut data = vec![0.0f32; channels * height * width];
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    let pixel = raw[(y * width + x) * channels + c];
                    data[c * height * width + y * width + x] = pixel as f32 / 127.5 - 1.0;
                }
            }
        }
        Tensor::try_new(&data, &[channels, height, width])
    }

    /// 将`[channels, height, width]`张量（值域[-1, 1]）转换回图像
    pub fn to_image(&self) -> Result<DynamicImage, TensorError> {
        if self.dimension() != 3 {
            return Err(TensorError::RankMismatch {
                expected: 3,
                shape: self.shape().to_vec(),
            });
        }
        let (channels, height, width) = (self.shape()[0], self.shape()[1], self.shape()[2]);
        let to_u8 = |v: f32| ((v.clamp(-1.0, 1.0) + 1.0) * 127.5).round() as u8;

        match channels {
            1 => {
                let mut buffer = GrayImage::new(width as u32, height as u32);
                for y in 0..height {
                    for x in 0..width {
                        buffer.put_pixel(x as u32, y as u32, image::Luma([to_u8(self[[0, y, x]])]));
                    }
                }
                Ok(DynamicImage::ImageLuma8(buffer))
            }
            3 => {
                let mut buffer = RgbImage::new(width as u32, height as u32);
                for y in 0..height {
                    for x in 0..width {
                        let pixel = [
                            to_u8(self[[0, y, x]]),
                            to_u8(self[[1, y, x]]),
                            to_u8(self[[2, y, x]]),
                        ];
                        buffer.put_pixel(x as u32, y as u32, image::Rgb(pixel));
                    }
                }
                Ok(DynamicImage::ImageRgb8(buffer))
            }
            _ => Err(TensorError::IncompatibleShape),
        }
    }
}
