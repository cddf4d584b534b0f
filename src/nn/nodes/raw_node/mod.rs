//! 原始节点：每种节点只关心自己的前向计算和对各父节点的 VJP，
//! 父节点的值由 GraphInner 按父节点顺序传入。

mod input;
mod loss;
mod ops;
mod parameter;

pub(in crate::nn) use input::Input;
pub(in crate::nn) use loss::*;
pub(in crate::nn) use ops::*;
pub(in crate::nn) use parameter::Parameter;

use crate::nn::GraphError;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
pub(in crate::nn) enum NodeType {
    Input(Input),
    Parameter(Parameter),
    Add(Add),
    Subtract(Subtract),
    Multiply(Multiply),
    MatMul(MatMul),
    Sigmoid(Sigmoid),
    Tanh(Tanh),
    LeakyRelu(LeakyRelu),
    Reshape(Reshape),
    Concat(Concat),
    Conv2d(Conv2d),
    Dct2d(Dct2d),
    Mean(Mean),
    Identity(Identity),
    BceWithLogitsLoss(BceWithLogitsLoss),
    MseLoss(MseLoss),
}

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    /// 节点类型名，用于生成默认节点名和错误信息
    fn kind(&self) -> &'static str;

    /// 根据父节点的值计算本节点的值
    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError>;

    /// VJP：给定本节点的上游梯度，计算对第`parent_index`个父节点的梯度
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError>;
}

/// 叶子节点没有父节点，不参与前向计算与 VJP
fn leaf_has_no_parents(kind: &str) -> GraphError {
    GraphError::InvalidOperation(format!("{kind}节点是叶子节点，没有父节点"))
}

/// 校验父节点个数
fn expect_parents(kind: &str, parents: &[&Tensor], count: usize) -> Result<(), GraphError> {
    if parents.len() != count {
        return Err(GraphError::InvalidOperation(format!(
            "{kind}节点需要{count}个父节点，实际为{}个",
            parents.len()
        )));
    }
    Ok(())
}
