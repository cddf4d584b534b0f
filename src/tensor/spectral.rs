//! 频域变换：正交 DCT-II 基矩阵与图像张量的二维 DCT / 逆 DCT。
//! 对单个通道 X（H×W）：F = D_H · X · D_Wᵀ，X = D_Hᵀ · F · D_W。
//! 由于基矩阵正交，二维 DCT 是线性等距变换，其 VJP 恰好是逆变换。

use super::Tensor;
use crate::errors::{ComparisonOperator, TensorError};
use ndarray::{Array2, Array4, Ix4, s};

impl Tensor {
    /// 创建`n`×`n`的正交 DCT-II 基矩阵：
    /// D[k][i] = α_k · cos(π · (2i + 1) · k / 2n)，α_0 = √(1/n)，α_k = √(2/n)
    pub fn dct_matrix(n: usize) -> Result<Tensor, TensorError> {
        if n == 0 {
            return Err(TensorError::ValueMustSatisfyComparison {
                value_name: "n".to_string(),
                operator: ComparisonOperator::GreaterThan,
                threshold: 0,
            });
        }
        Ok(Tensor::from_array(dct_basis(n).into_dyn()))
    }

    /// 对`[batch, channels, height, width]`张量的每个通道做二维 DCT
    pub fn dct2d(&self) -> Result<Tensor, TensorError> {
        self.apply_separable(false)
    }

    /// 二维逆 DCT（[`Tensor::dct2d`]的逆变换）
    pub fn idct2d(&self) -> Result<Tensor, TensorError> {
        self.apply_separable(true)
    }

    fn apply_separable(&self, inverse: bool) -> Result<Tensor, TensorError> {
        let input = self
            .data
            .view()
            .into_dimensionality::<Ix4>()
            .map_err(|_| TensorError::RankMismatch {
                expected: 4,
                shape: self.shape().to_vec(),
            })?;
        let (batch, channels, height, width) = input.dim();
        let d_h = dct_basis(height);
        let d_w = dct_basis(width);

        let mut output = Array4::<f32>::zeros((batch, channels, height, width));
        for b in 0..batch {
            for c in 0..channels {
                let plane = input.slice(s![b, c, .., ..]);
                let transformed = if inverse {
                    d_h.t().dot(&plane).dot(&d_w)
                } else {
                    d_h.dot(&plane).dot(&d_w.t())
                };
                output.slice_mut(s![b, c, .., ..]).assign(&transformed);
            }
        }
        Ok(Tensor::from_array(output.into_dyn()))
    }
}

fn dct_basis(n: usize) -> Array2<f32> {
    let n_f = n as f32;
    Array2::from_shape_fn((n, n), |(k, i)| {
        let alpha = if k == 0 {
            (1.0 / n_f).sqrt()
        } else {
            (2.0 / n_f).sqrt()
        };
        let angle = std::f32::consts::PI * (2.0 * i as f32 + 1.0) * k as f32 / (2.0 * n_f);
        alpha * angle.cos()
    })
}
