//! 张量的逐元素数学函数与矩阵乘法

use super::Tensor;
use crate::errors::{Operator, TensorError};
use ndarray::Ix2;

impl Tensor {
    /// 对每个元素应用`f`，返回新张量
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Tensor {
        Tensor::from_array(self.data.mapv(f))
    }

    /// 逐元素组合两个形状完全一致的张量
    pub fn zip_map<F: Fn(f32, f32) -> f32>(
        &self,
        other: &Tensor,
        f: F,
    ) -> Result<Tensor, TensorError> {
        if !self.is_same_shape(other) {
            return Err(TensorError::InconsitentShape);
        }
        let mut data = self.data.clone();
        data.zip_mut_with(&other.data, |a, &b| *a = f(*a, b));
        Ok(Tensor::from_array(data))
    }

    /// 数值稳定的 sigmoid：1 / (1 + e^(-x))
    pub fn sigmoid(&self) -> Tensor {
        self.map(|x| {
            if x >= 0.0 {
                1.0 / (1.0 + (-x).exp())
            } else {
                let e = x.exp();
                e / (1.0 + e)
            }
        })
    }

    pub fn tanh(&self) -> Tensor {
        self.map(f32::tanh)
    }

    /// 数值稳定的 softplus：ln(1 + e^x) = max(x, 0) + ln(1 + e^(-|x|))
    pub fn softplus(&self) -> Tensor {
        self.map(|x| x.max(0.0) + (-x.abs()).exp().ln_1p())
    }

    pub fn leaky_relu(&self, alpha: f32) -> Tensor {
        self.map(|x| if x > 0.0 { x } else { alpha * x })
    }

    pub fn exp(&self) -> Tensor {
        self.map(f32::exp)
    }

    pub fn ln(&self) -> Tensor {
        self.map(f32::ln)
    }

    pub fn sqrt(&self) -> Tensor {
        self.map(f32::sqrt)
    }

    pub fn abs(&self) -> Tensor {
        self.map(f32::abs)
    }

    pub fn square(&self) -> Tensor {
        self.map(|x| x * x)
    }

    /// 2阶张量（矩阵）乘法：[m, k] @ [k, n] = [m, n]
    pub fn mat_mul(&self, other: &Tensor) -> Result<Tensor, TensorError> {
        let shape_error = || TensorError::OperatorError {
            operator: Operator::MatMul,
            tensor1_shape: self.shape().to_vec(),
            tensor2_shape: other.shape().to_vec(),
        };
        let a = self
            .data
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| shape_error())?;
        let b = other
            .data
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| shape_error())?;
        if a.ncols() != b.nrows() {
            return Err(shape_error());
        }
        Ok(Tensor::from_array(a.dot(&b).into_dyn()))
    }

    /// 2阶张量（矩阵）转置
    pub fn transpose(&self) -> Result<Tensor, TensorError> {
        if self.dimension() != 2 {
            return Err(TensorError::RankMismatch {
                expected: 2,
                shape: self.shape().to_vec(),
            });
        }
        let transposed = self.data.t().as_standard_layout().into_owned();
        Ok(Tensor::from_array(transposed))
    }
}
