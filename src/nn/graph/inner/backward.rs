//! GraphInner VJP 反向传播

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::NodeId;
use crate::nn::nodes::TraitNode;
use crate::tensor::Tensor;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

impl GraphInner {
    /// 反向传播，返回损失值；结束后释放途经的中间节点的值
    pub fn backward(&mut self, loss: NodeId) -> Result<f32, GraphError> {
        self.backward_ex(loss, false)
    }

    /// 反向传播（扩展版本）。`retain_graph`为 true 时保留中间节点的值，
    /// 以便再次经过同一子图反向传播。
    pub fn backward_ex(&mut self, loss: NodeId, retain_graph: bool) -> Result<f32, GraphError> {
        let loss_node = self.get_node(loss)?;
        let loss_value = loss_node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("损失{loss_node}的值已被释放"))
        })?;
        let loss_scalar = loss_value.get_data_number().ok_or_else(|| {
            GraphError::InvalidOperation(format!(
                "反向传播要求损失为标量，但得到形状{:?}",
                loss_value.shape()
            ))
        })?;
        if !loss_node.requires_grad() {
            return Err(GraphError::InvalidOperation(format!(
                "损失{loss_node}不依赖任何需要梯度的节点（可能处于 no_grad/eval 模式或已被 detach）"
            )));
        }
        let seed_grad = Tensor::ones(loss_value.shape());

        let topo_order = self.topological_sort_backward(loss)?;

        let mut pending: HashMap<NodeId, Tensor> = HashMap::new();
        pending.insert(loss, seed_grad);
        for &node_id in &topo_order {
            let Some(upstream) = pending.remove(&node_id) else {
                continue;
            };
            if self.get_node(node_id)?.is_leaf() {
                self.get_node_mut(node_id)?.accumulate_grad(&upstream)?;
                continue;
            }
            for (parent_id, grad) in self.propagate_grad_to_parents(node_id, &upstream)? {
                match pending.entry(parent_id) {
                    Entry::Occupied(mut entry) => {
                        let sum = entry.get() + &grad;
                        entry.insert(sum);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(grad);
                    }
                }
            }
        }

        if !retain_graph {
            self.release_intermediate_results(loss, &topo_order)?;
        }

        Ok(loss_scalar)
    }

    /// 计算一个运算节点对其所有需要梯度的父节点的梯度
    fn propagate_grad_to_parents(
        &self,
        node_id: NodeId,
        upstream_grad: &Tensor,
    ) -> Result<Vec<(NodeId, Tensor)>, GraphError> {
        let node = self.get_node(node_id)?;
        let value = node.value().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "{node}的值已在上一次反向传播中释放，如需再次反向传播请使用 retain_graph"
            ))
        })?;
        let parents = node
            .parents()
            .iter()
            .map(|id| self.get_node(*id))
            .collect::<Result<Vec<_>, _>>()?;
        let parent_values = parents
            .iter()
            .map(|parent| {
                parent.value().ok_or_else(|| {
                    GraphError::ComputationError(format!(
                        "{parent}的值已在上一次反向传播中释放，如需再次反向传播请使用 retain_graph"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut grads = Vec::new();
        for (index, parent) in parents.iter().enumerate() {
            if !parent.requires_grad() {
                continue;
            }
            let grad = node
                .node_type()
                .calc_grad_to_parent(index, &parent_values, value, upstream_grad)?;
            if grad.shape() != parent_values[index].shape() {
                return Err(GraphError::ShapeMismatch {
                    expected: parent_values[index].shape().to_vec(),
                    got: grad.shape().to_vec(),
                    message: format!("{node}传给父节点{parent}的梯度形状错误"),
                });
            }
            grads.push((parent.id(), grad));
        }
        Ok(grads)
    }

    /// 从损失出发的逆拓扑序（损失在前）：
    /// 对需要梯度的父节点做后序 DFS，再反转。不需要梯度的节点（含 detach 节点）不会被访问。
    fn topological_sort_backward(&self, loss: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let mut visited = HashSet::new();
        let mut post_order = Vec::new();
        // (节点, 是否已展开其父节点)
        let mut stack = vec![(loss, false)];

        while let Some((node_id, expanded)) = stack.pop() {
            if expanded {
                post_order.push(node_id);
                continue;
            }
            if !visited.insert(node_id) {
                continue;
            }
            stack.push((node_id, true));
            for &parent_id in self.get_node(node_id)?.parents() {
                if !visited.contains(&parent_id) && self.get_node(parent_id)?.requires_grad() {
                    stack.push((parent_id, false));
                }
            }
        }

        post_order.reverse();
        Ok(post_order)
    }

    /// 释放本次反向传播途经的中间节点的值（损失节点与叶子节点除外）
    fn release_intermediate_results(&mut self, loss: NodeId, visited: &[NodeId]) -> Result<(), GraphError> {
        for &node_id in visited {
            if node_id == loss {
                continue;
            }
            let node = self.get_node_mut(node_id)?;
            if !node.is_leaf() {
                node.release_value();
            }
        }
        Ok(())
    }

    /// 清除所有参数节点的梯度
    pub fn zero_grad(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_grad();
        }
    }

    /// 清除指定节点的梯度
    pub fn clear_node_grad(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        self.get_node_mut(node_id)?.clear_grad();
        Ok(())
    }
}
