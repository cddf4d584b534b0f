use super::super::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 沿指定轴拼接任意多个父节点
///
/// backward: 上游梯度沿同一轴按各父节点的长度拆分
pub(in crate::nn) struct Concat {
    axis: usize,
    sizes: Vec<usize>,
}

impl Concat {
    pub(in crate::nn) fn new(parents: &[&Tensor], axis: usize) -> Result<Self, GraphError> {
        if parents.len() < 2 {
            return Err(GraphError::InvalidOperation(
                "Concat节点至少需要2个父节点".to_string(),
            ));
        }
        let first = parents[0];
        if axis >= first.dimension() {
            return Err(GraphError::InvalidOperation(format!(
                "Concat的轴{axis}超出父节点阶数{}",
                first.dimension()
            )));
        }
        for other in &parents[1..] {
            let compatible = other.dimension() == first.dimension()
                && (0..first.dimension()).all(|i| i == axis || first.shape()[i] == other.shape()[i]);
            if !compatible {
                return Err(GraphError::ShapeMismatch {
                    expected: first.shape().to_vec(),
                    got: other.shape().to_vec(),
                    message: format!("Concat要求除轴{axis}外其余维度一致"),
                });
            }
        }
        Ok(Self {
            axis,
            sizes: parents.iter().map(|p| p.shape()[axis]).collect(),
        })
    }
}

impl TraitNode for Concat {
    fn kind(&self) -> &'static str {
        "Concat"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(Tensor::concat(parents, self.axis)?)
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let mut parts = upstream_grad.split(self.axis, &self.sizes)?;
        if parent_index >= parts.len() {
            return Err(GraphError::InvalidOperation(format!(
                "Concat没有第{parent_index}个父节点"
            )));
        }
        Ok(parts.swap_remove(parent_index))
    }
}
