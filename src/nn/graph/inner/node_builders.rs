//! GraphInner 节点创建（new_*_node）
//!
//! 节点在创建时即根据父节点的值完成前向计算。
//! 运算节点是否需要梯度：图处于训练模式且至少有一个父节点需要梯度。

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::raw_node::{
    Add, BceWithLogitsLoss, Concat, Conv2d, Dct2d, Identity, Input, LeakyRelu, MatMul, Mean,
    MseLoss, Multiply, Parameter, Reshape, Sigmoid, Subtract, Tanh,
};
use crate::nn::nodes::{NodeHandle, NodeType, TraitNode};
use crate::tensor::Tensor;

impl GraphInner {
    fn gen_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn gen_node_name(kind: &str, id: NodeId, name: Option<&str>) -> String {
        name.map_or_else(|| format!("{}_{}", kind.to_lowercase(), id.0), str::to_string)
    }

    fn add_leaf_node(
        &mut self,
        raw_node: NodeType,
        value: &Tensor,
        name: Option<&str>,
        requires_grad: bool,
    ) -> Result<NodeId, GraphError> {
        let id = self.gen_node_id();
        let name = Self::gen_node_name(raw_node.kind(), id, name);
        let node = NodeHandle::new(id, name, raw_node, Vec::new(), value.clone(), requires_grad, false);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// 创建运算节点：校验父节点、构造原始节点、即时计算值
    fn add_op_node<T, F>(&mut self, parent_ids: &[NodeId], build: F) -> Result<NodeId, GraphError>
    where
        T: Into<NodeType>,
        F: FnOnce(&[&Tensor]) -> Result<T, GraphError>,
    {
        self.add_op_node_ex(parent_ids, false, build)
    }

    fn add_op_node_ex<T, F>(
        &mut self,
        parent_ids: &[NodeId],
        detached: bool,
        build: F,
    ) -> Result<NodeId, GraphError>
    where
        T: Into<NodeType>,
        F: FnOnce(&[&Tensor]) -> Result<T, GraphError>,
    {
        let (raw_node, value, parents_require_grad) = {
            let parents = parent_ids
                .iter()
                .map(|id| self.get_node(*id))
                .collect::<Result<Vec<_>, _>>()?;
            let parent_values = parents
                .iter()
                .map(|parent| {
                    parent.value().ok_or_else(|| {
                        GraphError::ComputationError(format!(
                            "父节点{parent}的值已在反向传播后释放，不能再用于新的计算"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let raw_node: NodeType = build(&parent_values)?.into();
            let value = raw_node.calc_value(&parent_values)?;
            let parents_require_grad = parents.iter().any(|p| p.requires_grad());
            (raw_node, value, parents_require_grad)
        };

        let requires_grad = !detached && self.is_grad_enabled() && parents_require_grad;
        let id = self.gen_node_id();
        let name = Self::gen_node_name(raw_node.kind(), id, None);
        let node = NodeHandle::new(
            id,
            name,
            raw_node,
            parent_ids.to_vec(),
            value,
            requires_grad,
            detached,
        );
        self.nodes.insert(id, node);
        Ok(id)
    }

    // ========== 叶子节点 ==========

    pub fn new_input_node(&mut self, value: &Tensor, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_leaf_node(Input.into(), value, name, false)
    }

    /// 参数节点名称在图内必须唯一（参数文件按名称匹配）
    pub fn new_parameter_node(&mut self, value: &Tensor, name: &str) -> Result<NodeId, GraphError> {
        if self.find_parameter_by_name(name).is_some() {
            return Err(GraphError::DuplicateNodeName(name.to_string()));
        }
        self.add_leaf_node(Parameter.into(), value, Some(name), true)
    }

    // ========== 运算节点 ==========

    pub fn new_add_node(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[a, b], Add::new)
    }

    pub fn new_subtract_node(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[a, b], Subtract::new)
    }

    pub fn new_multiply_node(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[a, b], Multiply::new)
    }

    pub fn new_mat_mul_node(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[a, b], MatMul::new)
    }

    pub fn new_sigmoid_node(&mut self, x: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], Sigmoid::new)
    }

    pub fn new_tanh_node(&mut self, x: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], Tanh::new)
    }

    pub fn new_leaky_relu_node(&mut self, x: NodeId, alpha: f32) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], |parents| LeakyRelu::new(parents, alpha))
    }

    pub fn new_reshape_node(&mut self, x: NodeId, shape: &[usize]) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], |parents| Reshape::new(parents, shape))
    }

    pub fn new_concat_node(&mut self, parents: &[NodeId], axis: usize) -> Result<NodeId, GraphError> {
        self.add_op_node(parents, |values| Concat::new(values, axis))
    }

    pub fn new_conv2d_node(
        &mut self,
        input: NodeId,
        kernel: NodeId,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<NodeId, GraphError> {
        self.add_op_node(&[input, kernel], |parents| Conv2d::new(parents, stride, padding))
    }

    pub fn new_dct2d_node(&mut self, x: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], Dct2d::new)
    }

    pub fn new_mean_node(&mut self, x: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[x], Mean::new)
    }

    /// `detached`为 true 时新节点不需要梯度，反向传播在此截断
    pub fn new_identity_node(&mut self, x: NodeId, detached: bool) -> Result<NodeId, GraphError> {
        self.add_op_node_ex(&[x], detached, Identity::new)
    }

    // ========== 损失节点 ==========

    pub fn new_bce_with_logits_loss_node(
        &mut self,
        logits: NodeId,
        target: NodeId,
    ) -> Result<NodeId, GraphError> {
        self.add_op_node(&[logits, target], BceWithLogitsLoss::new)
    }

    pub fn new_mse_loss_node(&mut self, prediction: NodeId, target: NodeId) -> Result<NodeId, GraphError> {
        self.add_op_node(&[prediction, target], MseLoss::new)
    }
}
