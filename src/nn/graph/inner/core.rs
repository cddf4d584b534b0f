//! GraphInner 基础操作：创建、节点查询、瞬时节点释放

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

impl GraphInner {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// 创建带种子的图（参数初始化与噪声采样均可复现）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 0,
            is_eval_mode: false,
            rng,
        }
    }

    pub(in crate::nn) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// 按 id 升序返回所有节点
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub(in crate::nn) fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(&mut self, id: NodeId) -> Result<&mut NodeHandle, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.get_node(id)?.name())
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        Ok(self.get_node(id)?.value())
    }

    pub fn set_node_value(&mut self, id: NodeId, value: &Tensor) -> Result<(), GraphError> {
        self.get_node_mut(id)?.set_value(value)
    }

    pub fn get_node_grad(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        Ok(self.get_node(id)?.grad())
    }

    pub fn is_node_detached(&self, id: NodeId) -> Result<bool, GraphError> {
        Ok(self.get_node(id)?.is_detached())
    }

    pub fn node_requires_grad(&self, id: NodeId) -> Result<bool, GraphError> {
        Ok(self.get_node(id)?.requires_grad())
    }

    /// 所有参数节点（按 id 升序）
    pub fn get_trainable_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(NodeHandle::is_parameter))
            .collect()
    }

    pub(in crate::nn) fn find_parameter_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|node| node.is_parameter() && node.name() == name)
            .map(NodeHandle::id)
    }

    /// 移除所有非参数节点（输入、运算、损失），返回移除的节点数。
    /// 参数节点没有父节点，因此移除后图中不会留下悬空的边。
    pub fn release_transient_nodes(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| node.is_parameter());
        before - self.nodes.len()
    }
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}
