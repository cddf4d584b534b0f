use crate::tensor::Tensor;
use std::ops::Neg;

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        Tensor::from_array(-self.data)
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        Tensor::from_array(-&self.data)
    }
}
