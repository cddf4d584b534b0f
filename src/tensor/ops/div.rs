use crate::errors::Operator;
use crate::tensor::Tensor;

impl_tensor_binary_op!(Div, div, /, Operator::Div);
