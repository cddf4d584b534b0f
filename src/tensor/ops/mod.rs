//! 张量的四则运算。支持以下情况：
//! 1. 其中一个操作数为纯数而另一个为张量：则返回的张量形状与该张量相同；
//! 2. 两个操作数均为张量：支持 NumPy 风格的广播（broadcasting）。
//! 形状无法广播时 panic，计算图中的节点在调用前自行校验形状并返回错误。

/// 为`Tensor`/`&Tensor`及`f32`的各种组合生成二元运算 trait 实现
macro_rules! impl_tensor_binary_op {
    ($trait:ident, $method:ident, $op:tt, $operator:expr) => {
        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 与 f32↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl std::ops::$trait<f32> for Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                Tensor::from_array(&self.data $op scalar)
            }
        }
        impl std::ops::$trait<f32> for &Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                Tensor::from_array(&self.data $op scalar)
            }
        }
        impl std::ops::$trait<Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: Tensor) -> Tensor {
                Tensor::from_array(self $op &tensor.data)
            }
        }
        impl<'a> std::ops::$trait<&'a Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: &'a Tensor) -> Tensor {
                Tensor::from_array(self $op &tensor.data)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 与 f32↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 与（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl std::ops::$trait for Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                std::ops::$trait::$method(&self, &other)
            }
        }
        impl<'a> std::ops::$trait<&'a Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, other: &'a Tensor) -> Tensor {
                std::ops::$trait::$method(&self, other)
            }
        }
        impl std::ops::$trait<Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                std::ops::$trait::$method(self, &other)
            }
        }
        impl<'b> std::ops::$trait<&'b Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: &'b Tensor) -> Tensor {
                assert!(
                    self.can_broadcast_with(other),
                    "{}",
                    crate::errors::TensorError::OperatorError {
                        operator: $operator,
                        tensor1_shape: self.shape().to_vec(),
                        tensor2_shape: other.shape().to_vec(),
                    }
                );
                // 使用 ndarray 的原生广播
                Tensor::from_array(&self.data $op &other.data)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 与（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    };
}

pub mod add;
pub mod assign;
pub mod div;
pub mod mul;
pub mod neg;
pub mod sub;
