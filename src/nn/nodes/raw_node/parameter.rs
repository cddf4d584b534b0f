use super::{TraitNode, leaf_has_no_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 可训练参数节点：跨训练步常驻于图中，梯度在反向传播时累加
pub(in crate::nn) struct Parameter;

impl TraitNode for Parameter {
    fn kind(&self) -> &'static str {
        "Parameter"
    }

    fn calc_value(&self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Err(leaf_has_no_parents(self.kind()))
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(leaf_has_no_parents(self.kind()))
    }
}
