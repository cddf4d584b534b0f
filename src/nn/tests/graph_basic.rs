use approx::assert_abs_diff_eq;

use crate::nn::{Graph, GraphError, Init, VarActivationOps, VarLossOps, VarMatrixOps};
use crate::tensor::Tensor;

#[test]
fn test_nodes_are_evaluated_on_creation() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., 2.], &[1, 2])).unwrap();
    let w = graph
        .parameter_from_tensor(&Tensor::new(&[1., 0., 0., 1.], &[2, 2]), "w")
        .unwrap();
    let y = x.matmul(&w).unwrap().sigmoid().unwrap();
    let value = y.value().unwrap().unwrap();
    assert_eq!(value.shape(), &[1, 2]);
    assert_abs_diff_eq!(value[[0, 0]], 0.731_058_6, epsilon = 1e-6);
    assert_abs_diff_eq!(value[[0, 1]], 0.880_797_1, epsilon = 1e-6);
}

#[test]
fn test_parameter_names_must_be_unique() {
    let graph = Graph::new();
    graph.parameter(&[2, 2], Init::Zeros, "w").unwrap();
    let result = graph.parameter(&[3], Init::Ones, "w");
    assert_eq!(
        result.unwrap_err(),
        GraphError::DuplicateNodeName("w".to_string())
    );
}

#[test]
fn test_seeded_graphs_initialise_identically() {
    let a = Graph::new_with_seed(7).parameter(&[4, 3], Init::Kaiming, "w").unwrap();
    let b = Graph::new_with_seed(7).parameter(&[4, 3], Init::Kaiming, "w").unwrap();
    let c = Graph::new_with_seed(8).parameter(&[4, 3], Init::Kaiming, "w").unwrap();
    assert_eq!(a.tensor().unwrap().to_vec(), b.tensor().unwrap().to_vec());
    assert_ne!(a.tensor().unwrap().to_vec(), c.tensor().unwrap().to_vec());
}

#[test]
fn test_shape_mismatch_is_reported() {
    let graph = Graph::new();
    let a = graph.input(&Tensor::zeros(&[2, 3])).unwrap();
    let b = graph.input(&Tensor::zeros(&[4, 3])).unwrap();
    assert!(matches!(
        a.try_add(&b),
        Err(GraphError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        a.matmul(&b),
        Err(GraphError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        a.mse_loss(&b),
        Err(GraphError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_vars_from_different_graphs_cannot_mix() {
    let a = Graph::new().input(&Tensor::zeros(&[2])).unwrap();
    let b = Graph::new().input(&Tensor::zeros(&[2])).unwrap();
    assert!(matches!(a.try_add(&b), Err(GraphError::InvalidOperation(_))));
}

#[test]
fn test_release_transient_nodes_keeps_parameters() {
    let graph = Graph::new();
    let w = graph.parameter(&[2, 1], Init::Ones, "w").unwrap();
    let x = graph.input(&Tensor::ones(&[3, 2])).unwrap();
    let y = x.matmul(&w).unwrap().tanh().unwrap();
    assert_eq!(graph.nodes_count(), 4);

    let removed = graph.release_transient_nodes();
    assert_eq!(removed, 3);
    assert_eq!(graph.nodes_count(), 1);
    assert!(w.value().unwrap().is_some());
    assert!(matches!(y.value(), Err(GraphError::NodeNotFound(_))));
}

#[test]
fn test_item_requires_scalar() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::zeros(&[2])).unwrap();
    assert!(matches!(x.item(), Err(GraphError::InvalidOperation(_))));
    let s = graph.constant(3.0, &[1, 1]).unwrap();
    assert_eq!(s.item().unwrap(), 3.0);
}
