use super::super::{TraitNode, expect_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 对[batch, channels, height, width]的每个通道做正交二维 DCT
///
/// backward: 正交变换的 VJP 即逆变换 idct2d
pub(in crate::nn) struct Dct2d;

impl Dct2d {
    pub(in crate::nn) fn new(parents: &[&Tensor]) -> Result<Self, GraphError> {
        expect_parents("Dct2d", parents, 1)?;
        if parents[0].dimension() != 4 {
            return Err(GraphError::ShapeMismatch {
                expected: vec![0, 0, 0, 0],
                got: parents[0].shape().to_vec(),
                message: "Dct2d节点需要4阶[batch, channels, height, width]输入".to_string(),
            });
        }
        Ok(Self)
    }
}

impl TraitNode for Dct2d {
    fn kind(&self) -> &'static str {
        "Dct2d"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].dct2d()?)
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.idct2d()?)
    }
}
