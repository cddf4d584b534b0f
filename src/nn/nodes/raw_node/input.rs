use super::{TraitNode, leaf_has_no_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 输入节点（数据、噪声、常量），不需要梯度
pub(in crate::nn) struct Input;

impl TraitNode for Input {
    fn kind(&self) -> &'static str {
        "Input"
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
