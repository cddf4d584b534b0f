use crate::errors::Operator;
use crate::tensor::Tensor;

impl_tensor_binary_op!(Sub, sub, -, Operator::Sub);
