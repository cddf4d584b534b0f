mod add;
mod concat;
mod conv2d;
mod dct2d;
mod identity;
mod leaky_relu;
mod mat_mul;
mod mean;
mod multiply;
mod reshape;
mod sigmoid;
mod subtract;
mod tanh;

pub(in crate::nn) use add::Add;
pub(in crate::nn) use concat::Concat;
pub(in crate::nn) use conv2d::Conv2d;
pub(in crate::nn) use dct2d::Dct2d;
pub(in crate::nn) use identity::Identity;
pub(in crate::nn) use leaky_relu::LeakyRelu;
pub(in crate::nn) use mat_mul::MatMul;
pub(in crate::nn) use mean::Mean;
pub(in crate::nn) use multiply::Multiply;
pub(in crate::nn) use reshape::Reshape;
pub(in crate::nn) use sigmoid::Sigmoid;
pub(in crate::nn) use subtract::Subtract;
pub(in crate::nn) use tanh::Tanh;

use crate::nn::GraphError;
use crate::tensor::{Tensor, broadcast_shape};

/// 二元逐元素节点的广播校验，返回广播后的形状
fn check_broadcast(kind: &str, a: &Tensor, b: &Tensor) -> Result<Vec<usize>, GraphError> {
    broadcast_shape(a.shape(), b.shape()).ok_or_else(|| GraphError::ShapeMismatch {
        expected: a.shape().to_vec(),
        got: b.shape().to_vec(),
        message: format!("{kind}节点的两个父节点形状无法广播"),
    })
}
