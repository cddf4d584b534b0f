use crate::errors::Operator;
use crate::tensor::Tensor;

impl_tensor_binary_op!(Mul, mul, *, Operator::Mul);
