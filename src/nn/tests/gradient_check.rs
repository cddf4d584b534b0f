//! 各节点 VJP 与中心差分数值梯度的对比

use approx::assert_abs_diff_eq;

use super::weighted_mean;
use crate::nn::{
    Graph, GraphError, Var, VarActivationOps, VarFrequencyOps, VarLossOps, VarMatrixOps,
    VarReduceOps, VarShapeOps,
};
use crate::tensor::Tensor;

/// 以`init`为参数 p 的初值，比较 build(p) 的解析梯度与数值梯度
fn check_gradient<F>(init: &Tensor, build: F)
where
    F: Fn(&Graph, &Var) -> Result<Var, GraphError>,
{
    let graph = Graph::new_with_seed(0);
    let p = graph.parameter_from_tensor(init, "p").unwrap();
    let loss = build(&graph, &p).unwrap();
    loss.backward().unwrap();
    let analytic = p.grad().unwrap().expect("参数应当有梯度").to_vec();

    let base = init.to_vec();
    let eps = 1e-2;
    let eval = |index: usize, delta: f32| {
        let mut data = base.clone();
        data[index] += delta;
        let g = Graph::new_with_seed(0);
        let p = g
            .parameter_from_tensor(&Tensor::new(&data, init.shape()), "p")
            .unwrap();
        build(&g, &p).unwrap().item().unwrap()
    };
    for (i, &analytic_i) in analytic.iter().enumerate() {
        let numeric = (eval(i, eps) - eval(i, -eps)) / (2.0 * eps);
        assert_abs_diff_eq!(analytic_i, numeric, epsilon = 1e-2);
    }
}

fn sample(shape: &[usize], seed: u64) -> Tensor {
    Tensor::normal_seeded(0.0, 1.0, shape, seed)
}

#[test]
fn test_add_with_broadcast_gradient() {
    // p 为[1, 3]，广播到[2, 3]
    check_gradient(&sample(&[1, 3], 1), |g, p| {
        let x = g.input(&sample(&[2, 3], 2))?;
        weighted_mean(g, &x.try_add(p)?)
    });
}

#[test]
fn test_subtract_gradient_for_right_operand() {
    check_gradient(&sample(&[2, 1], 3), |g, p| {
        let x = g.input(&sample(&[2, 4], 4))?;
        weighted_mean(g, &x.try_sub(p)?)
    });
}

#[test]
fn test_multiply_gradient() {
    check_gradient(&sample(&[2, 3], 5), |g, p| {
        let x = g.input(&sample(&[2, 3], 6))?;
        weighted_mean(g, &p.try_mul(&x)?.try_mul(p)?)
    });
}

#[test]
fn test_mat_mul_gradient_both_sides() {
    check_gradient(&sample(&[3, 2], 7), |g, p| {
        let x = g.input(&sample(&[4, 3], 8))?;
        weighted_mean(g, &x.matmul(p)?)
    });
    check_gradient(&sample(&[4, 3], 9), |g, p| {
        let w = g.input(&sample(&[3, 2], 10))?;
        weighted_mean(g, &p.matmul(&w)?)
    });
}

#[test]
fn test_activation_gradients() {
    check_gradient(&sample(&[2, 3], 11), |g, p| weighted_mean(g, &p.sigmoid()?));
    check_gradient(&sample(&[2, 3], 12), |g, p| weighted_mean(g, &p.tanh()?));
    // 远离 0 点，避免差分跨过折点
    let init = Tensor::new(&[-1.5, -0.5, 0.7, 1.3], &[2, 2]);
    check_gradient(&init, |g, p| weighted_mean(g, &p.leaky_relu(0.2)?));
}

#[test]
fn test_reshape_and_concat_gradient() {
    check_gradient(&sample(&[1, 2, 2, 2], 13), |g, p| {
        let other = g.input(&sample(&[1, 1, 2, 2], 14))?;
        let joined = p.concat(&[&other], 1)?;
        weighted_mean(g, &joined.flatten()?.sigmoid()?)
    });
}

#[test]
fn test_conv2d_gradient_to_input_and_kernel() {
    // 对输入求导：步长 2、填充 1
    check_gradient(&sample(&[2, 2, 5, 5], 15), |g, p| {
        let kernel = g.input(&sample(&[3, 2, 3, 3], 16))?;
        weighted_mean(g, &p.conv2d(&kernel, (2, 2), (1, 1))?)
    });
    // 对卷积核求导：步长 1、无填充
    check_gradient(&sample(&[3, 2, 3, 3], 17), |g, p| {
        let input = g.input(&sample(&[2, 2, 4, 4], 18))?;
        weighted_mean(g, &input.conv2d(p, (1, 1), (0, 0))?)
    });
}

#[test]
fn test_dct2d_gradient() {
    check_gradient(&sample(&[1, 2, 4, 3], 19), |g, p| {
        weighted_mean(g, &p.dct2d()?.tanh()?)
    });
}

#[test]
fn test_loss_gradients() {
    check_gradient(&sample(&[4, 1], 20), |g, p| {
        let target = g.input(&Tensor::new(&[1., 0., 1., 0.], &[4, 1]))?;
        p.bce_with_logits(&target)
    });
    check_gradient(&sample(&[2, 3], 21), |g, p| {
        let target = g.input(&sample(&[2, 3], 22))?;
        p.mse_loss(&target)
    });
}

#[test]
fn test_mean_gradient_is_uniform() {
    let graph = Graph::new();
    let p = graph.parameter_from_tensor(&sample(&[2, 5], 23), "p").unwrap();
    p.mean().unwrap().backward().unwrap();
    let grad = p.grad().unwrap().unwrap();
    for value in grad.iter() {
        assert_abs_diff_eq!(*value, 0.1, epsilon = 1e-6);
    }
}
