use approx::assert_abs_diff_eq;

use crate::fd_gan::{AdversarialLoss, GanLoss, GanMode};
use crate::nn::Graph;
use crate::tensor::Tensor;

#[test]
fn test_vanilla_loss_at_zero_logit_is_ln2() {
    let graph = Graph::new();
    let logits = graph.input(&Tensor::zeros(&[4, 1])).unwrap();
    let loss = GanLoss::new(GanMode::Vanilla);
    for is_real in [true, false] {
        let value = loss.forward(&logits, is_real).unwrap().item().unwrap();
        assert_abs_diff_eq!(value, std::f32::consts::LN_2, epsilon = 1e-6);
    }
}

#[test]
fn test_vanilla_loss_prefers_correct_sign() {
    let graph = Graph::new();
    let confident_real = graph.input(&Tensor::full(4.0, &[2, 1])).unwrap();
    let loss = GanLoss::default();
    let as_real = loss.forward(&confident_real, true).unwrap().item().unwrap();
    let as_fake = loss.forward(&confident_real, false).unwrap().item().unwrap();
    assert!(as_real < 0.05);
    assert!(as_fake > 3.9);
}

#[test]
fn test_least_squares_loss() {
    let graph = Graph::new();
    let prediction = graph.input(&Tensor::new(&[0.5, 2.0], &[2, 1])).unwrap();
    let loss = GanLoss::new(GanMode::LeastSquares);
    // 对 1：(0.25 + 1) / 2；对 0：(0.25 + 4) / 2
    let real = loss.forward(&prediction, true).unwrap().item().unwrap();
    let fake = loss.forward(&prediction, false).unwrap().item().unwrap();
    assert_abs_diff_eq!(real, 0.625, epsilon = 1e-6);
    assert_abs_diff_eq!(fake, 2.125, epsilon = 1e-6);
}
