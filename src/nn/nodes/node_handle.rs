use super::NodeId;
use super::raw_node::{NodeType, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use std::fmt;

/// 节点句柄：原始节点（运算语义）+ 图级状态（父节点、值、梯度、是否需要梯度）
///
/// 值在节点创建时即被计算（即时求值），反向传播后可被释放。
pub(in crate::nn) struct NodeHandle {
    id: NodeId,
    name: String,
    raw_node: NodeType,
    parents: Vec<NodeId>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    requires_grad: bool,
    detached: bool,
}

impl NodeHandle {
    pub(in crate::nn) fn new(
        id: NodeId,
        name: String,
        raw_node: NodeType,
        parents: Vec<NodeId>,
        value: Tensor,
        requires_grad: bool,
        detached: bool,
    ) -> Self {
        Self {
            id,
            name,
            raw_node,
            parents,
            value: Some(value),
            grad: None,
            requires_grad,
            detached,
        }
    }

    pub(in crate::nn) const fn id(&self) -> NodeId {
        self.id
    }

    pub(in crate::nn) fn name(&self) -> &str {
        &self.name
    }

    pub(in crate::nn) const fn node_type(&self) -> &NodeType {
        &self.raw_node
    }

    pub(in crate::nn) fn kind(&self) -> &'static str {
        self.raw_node.kind()
    }

    pub(in crate::nn) fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// 叶子节点（输入、参数）没有父节点，其值不会被反向传播释放
    pub(in crate::nn) fn is_leaf(&self) -> bool {
        self.parents.is_empty()
    }

    pub(in crate::nn) const fn is_parameter(&self) -> bool {
        matches!(self.raw_node, NodeType::Parameter(_))
    }

    pub(in crate::nn) const fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub(in crate::nn) const fn is_detached(&self) -> bool {
        self.detached
    }

    pub(in crate::nn) fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    /// 覆盖叶子节点的值（形状必须不变）
    pub(in crate::nn) fn set_value(&mut self, value: &Tensor) -> Result<(), GraphError> {
        if !self.is_leaf() {
            return Err(GraphError::InvalidOperation(format!(
                "{self}不是叶子节点，其值由父节点计算得到，不能手动设置"
            )));
        }
        if let Some(old) = &self.value {
            if old.shape() != value.shape() {
                return Err(GraphError::ShapeMismatch {
                    expected: old.shape().to_vec(),
                    got: value.shape().to_vec(),
                    message: format!("{self}的新值形状与原值不一致"),
                });
            }
        }
        self.value = Some(value.clone());
        Ok(())
    }

    pub(in crate::nn) fn release_value(&mut self) {
        self.value = None;
    }

    pub(in crate::nn) fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    pub(in crate::nn) fn clear_grad(&mut self) {
        self.grad = None;
    }

    /// 将一次反向传播得到的梯度累加到本节点
    pub(in crate::nn) fn accumulate_grad(&mut self, grad: &Tensor) -> Result<(), GraphError> {
        match &mut self.grad {
            Some(existing) => {
                if existing.shape() != grad.shape() {
                    return Err(GraphError::ShapeMismatch {
                        expected: existing.shape().to_vec(),
                        got: grad.shape().to_vec(),
                        message: format!("{}的梯度累加形状不一致", self.name),
                    });
                }
                *existing += grad;
            }
            None => self.grad = Some(grad.clone()),
        }
        Ok(())
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}节点 {}({})]", self.kind(), self.name, self.id)
    }
}
