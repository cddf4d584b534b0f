//! 优化器测试

use approx::assert_abs_diff_eq;

use crate::nn::{Adam, Graph, Optimizer, VarLossOps, VarReduceOps};
use crate::tensor::Tensor;

/// 测试: Adam 首步的已知结果
///
/// w=2，loss=3w（梯度恒为 3），lr=0.1：
/// m̂ = 3，v̂ = 9，更新量 = 0.1 · 3 / (3 + ε) ≈ 0.1，w_new ≈ 1.9
#[test]
fn test_adam_first_step_known_value() {
    let graph = Graph::new();
    let w = graph.parameter_from_tensor(&Tensor::new(&[2.0], &[1, 1]), "w").unwrap();
    let mut adam = Adam::new(&graph, &[w.clone()], 0.1);

    let loss = w.mul_scalar(3.0).unwrap().mean().unwrap();
    adam.minimize(&loss).unwrap();

    assert_abs_diff_eq!(w.item().unwrap(), 1.9, epsilon = 1e-5);
    assert_eq!(adam.steps(), 1);
}

/// 测试: 梯度恒定时 Adam 每步的更新量约等于 lr
#[test]
fn test_adam_constant_gradient_moves_by_lr_each_step() {
    let graph = Graph::new();
    let w = graph.parameter_from_tensor(&Tensor::new(&[0.0], &[1, 1]), "w").unwrap();
    let mut adam = Adam::with_config(&graph, &[w.clone()], 0.01, 0.5, 0.999, 1e-8);
    assert_eq!(adam.betas(), (0.5, 0.999));

    for _ in 0..3 {
        let loss = w.mul_scalar(-2.0).unwrap().mean().unwrap();
        adam.minimize(&loss).unwrap();
    }
    assert_abs_diff_eq!(w.item().unwrap(), 0.03, epsilon = 1e-5);
}

/// 测试: 优化器只更新、只清零自己绑定的参数
#[test]
fn test_optimizer_only_touches_bound_parameters() {
    let graph = Graph::new();
    let a = graph.parameter_from_tensor(&Tensor::ones(&[1, 1]), "a").unwrap();
    let b = graph.parameter_from_tensor(&Tensor::ones(&[1, 1]), "b").unwrap();
    let mut opt_a = Adam::new(&graph, &[a.clone()], 0.1);

    let loss = a.try_mul(&b).unwrap().mean().unwrap();
    loss.backward().unwrap();
    opt_a.step().unwrap();

    assert!(a.item().unwrap() < 1.0);
    assert_eq!(b.item().unwrap(), 1.0);

    opt_a.zero_grad().unwrap();
    assert!(a.grad().unwrap().is_none());
    assert!(b.grad().unwrap().is_some());
}

/// 测试: 没有梯度的参数在 step 中保持不变
#[test]
fn test_adam_skips_parameters_without_grad() {
    let graph = Graph::new();
    let w = graph.parameter_from_tensor(&Tensor::new(&[4.0], &[1, 1]), "w").unwrap();
    let mut adam = Adam::new(&graph, &[w.clone()], 0.1);
    adam.step().unwrap();
    assert_eq!(w.item().unwrap(), 4.0);

    adam.reset();
    assert_eq!(adam.steps(), 0);
}
