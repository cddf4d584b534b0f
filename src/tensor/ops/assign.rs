//! 张量的自运算（+=、-=、*=、/=）。
//! 右侧张量必须能广播到左侧张量的形状，否则 panic。

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use crate::tensor::property::broadcast_shape;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

fn assert_assignable(target: &Tensor, other: &Tensor, operator: Operator) {
    let ok = broadcast_shape(target.shape(), other.shape())
        .is_some_and(|shape| shape == target.shape());
    assert!(
        ok,
        "{}",
        TensorError::OperatorError {
            operator,
            tensor1_shape: target.shape().to_vec(),
            tensor2_shape: other.shape().to_vec(),
        }
    );
}

impl AddAssign<&Tensor> for Tensor {
    fn add_assign(&mut self, other: &Tensor) {
        assert_assignable(self, other, Operator::Add);
        self.data += &other.data;
    }
}

impl SubAssign<&Tensor> for Tensor {
    fn sub_assign(&mut self, other: &Tensor) {
        assert_assignable(self, other, Operator::Sub);
        self.data -= &other.data;
    }
}

impl MulAssign<f32> for Tensor {
    fn mul_assign(&mut self, scalar: f32) {
        self.data *= scalar;
    }
}

impl DivAssign<f32> for Tensor {
    fn div_assign(&mut self, scalar: f32) {
        self.data /= scalar;
    }
}
