mod gradient_check;
mod gradient_flow_control;
mod graph_basic;
mod layer;
mod optimizer;

use crate::nn::{Graph, GraphError, Var, VarReduceOps};
use crate::tensor::Tensor;

/// 与`var`同形状的固定权重常量（避免线性归约下梯度恒为常数，使检查更有区分度）
fn fixed_weights(graph: &Graph, var: &Var) -> Result<Var, GraphError> {
    let shape = var.shape()?;
    let size: usize = shape.iter().product();
    let data: Vec<f32> = (0..size).map(|i| ((i as f32) * 0.7).sin() + 1.1).collect();
    graph.input(&Tensor::new(&data, &shape))
}

/// 带固定权重的均值，把任意形状的 Var 归约为标量
fn weighted_mean(graph: &Graph, var: &Var) -> Result<Var, GraphError> {
    let weights = fixed_weights(graph, var)?;
    var.try_mul(&weights)?.mean()
}
