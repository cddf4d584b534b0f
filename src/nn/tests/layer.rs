use approx::assert_abs_diff_eq;

use crate::nn::{Conv2d, Graph, GraphError, Module};
use crate::tensor::Tensor;

#[test]
fn test_conv2d_parameter_names_and_counts() {
    let graph = Graph::new_with_seed(1);
    let conv = Conv2d::new(&graph, 4, 3, (3, 3), (1, 1), (1, 1), true, "conv").unwrap();
    let names: Vec<String> = conv.parameters().iter().map(|p| p.name().unwrap()).collect();
    assert_eq!(names, vec!["conv_K".to_string(), "conv_b".to_string()]);
    assert_eq!(conv.num_params(), 2);
    assert_eq!(conv.num_scalars(), 3 * 4 * 3 * 3 + 3);
}

#[test]
fn test_conv2d_without_bias_is_pure_convolution() {
    let graph = Graph::new();
    let conv = Conv2d::new(&graph, 1, 1, (1, 1), (1, 1), (0, 0), false, "pointwise").unwrap();
    conv.kernel().set_value(&Tensor::full(2.0, &[1, 1, 1, 1])).unwrap();
    let x = graph.input(&Tensor::new(&[1., 2., 3., 4.], &[1, 1, 2, 2])).unwrap();
    let y = conv.forward(&x).unwrap().tensor().unwrap();
    assert_eq!(y.to_vec(), vec![2., 4., 6., 8.]);
    assert_eq!(conv.num_params(), 1);
}

#[test]
fn test_conv2d_same_padding_keeps_spatial_size() {
    let graph = Graph::new_with_seed(2);
    let conv = Conv2d::same_3x3(&graph, 3, 8, "conv").unwrap();
    let x = graph.input(&Tensor::normal_seeded(0.0, 1.0, &[2, 3, 6, 5], 3)).unwrap();
    let y = conv.forward(&x).unwrap();
    assert_eq!(y.shape().unwrap(), vec![2, 8, 6, 5]);
    assert_eq!(conv.kernel().shape().unwrap(), vec![8, 3, 3, 3]);
}

#[test]
fn test_conv2d_stride_and_bias() {
    let graph = Graph::new();
    let conv = Conv2d::new(&graph, 1, 1, (2, 2), (2, 2), (0, 0), true, "down").unwrap();
    conv.kernel().set_value(&Tensor::ones(&[1, 1, 2, 2])).unwrap();
    let bias = graph.parameters().into_iter().find(|p| p.name().unwrap() == "down_b").unwrap();
    bias.set_value(&Tensor::full(0.5, &[1, 1, 1, 1])).unwrap();

    let data: Vec<f32> = (0..16).map(|i| i as f32).collect();
    let x = graph.input(&Tensor::new(&data, &[1, 1, 4, 4])).unwrap();
    let y = conv.forward(&x).unwrap().tensor().unwrap();
    assert_eq!(y.shape(), &[1, 1, 2, 2]);
    // 左上 2×2 窗口：0 + 1 + 4 + 5
    assert_abs_diff_eq!(y[[0, 0, 0, 0]], 10.5, epsilon = 1e-6);
    assert_abs_diff_eq!(y[[0, 0, 1, 1]], 10.0 + 11.0 + 14.0 + 15.0 + 0.5, epsilon = 1e-6);
}

#[test]
fn test_conv2d_rejects_channel_mismatch() {
    let graph = Graph::new();
    let conv = Conv2d::same_3x3(&graph, 3, 4, "conv").unwrap();
    let x = graph.input(&Tensor::zeros(&[1, 2, 4, 4])).unwrap();
    assert!(matches!(
        conv.forward(&x),
        Err(GraphError::ShapeMismatch { .. })
    ));
}
