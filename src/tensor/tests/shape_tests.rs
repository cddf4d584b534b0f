use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

#[test]
fn test_reshape() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let reshaped = tensor.reshape(&[3, 2]).unwrap();
    assert_eq!(reshaped.shape(), &[3, 2]);
    assert_eq!(reshaped.to_vec(), tensor.to_vec());
    assert!(tensor.reshape(&[4, 2]).is_err());
}

#[test]
fn test_concat_along_channels() {
    let a = Tensor::new(&[1., 2., 3., 4.], &[1, 1, 2, 2]);
    let b = Tensor::new(&[5., 6., 7., 8., 9., 10., 11., 12.], &[1, 2, 2, 2]);
    let c = Tensor::concat(&[&a, &b], 1).unwrap();
    assert_eq!(c.shape(), &[1, 3, 2, 2]);
    assert_eq!(c[[0, 0, 1, 1]], 4.);
    assert_eq!(c[[0, 1, 0, 0]], 5.);
    assert_eq!(c[[0, 2, 1, 1]], 12.);
}

#[test]
fn test_concat_with_mismatched_shapes() {
    let a = Tensor::zeros(&[1, 1, 2, 2]);
    let b = Tensor::zeros(&[1, 1, 3, 2]);
    assert_eq!(
        Tensor::concat(&[&a, &b], 1).unwrap_err(),
        TensorError::OperatorError {
            operator: Operator::Concat,
            tensor1_shape: vec![1, 1, 2, 2],
            tensor2_shape: vec![1, 1, 3, 2],
        }
    );
    assert_eq!(Tensor::concat(&[], 0).unwrap_err(), TensorError::EmptyList);
    assert_eq!(
        Tensor::concat(&[&a], 4).unwrap_err(),
        TensorError::AxisOutOfRange { axis: 4, rank: 4 }
    );
}

#[test]
fn test_split_undoes_concat() {
    let a = Tensor::normal_seeded(0., 1., &[2, 1, 3, 3], 1);
    let b = Tensor::normal_seeded(0., 1., &[2, 2, 3, 3], 2);
    let joined = Tensor::concat(&[&a, &b], 1).unwrap();
    let parts = joined.split(1, &[1, 2]).unwrap();
    assert_eq!(parts[0].to_vec(), a.to_vec());
    assert_eq!(parts[1].to_vec(), b.to_vec());
    assert!(joined.split(1, &[1, 1]).is_err());
}

#[test]
fn test_sample_at() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]);
    let sample = tensor.sample_at(1).unwrap();
    assert_eq!(sample.shape(), &[1, 2]);
    assert_eq!(sample.to_vec(), vec![3., 4.]);
    assert!(tensor.sample_at(3).is_err());
}

#[test]
fn test_select_samples_reorders_batch() {
    let t = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]);
    let picked = t.select_samples(&[2, 0]);
    assert_eq!(picked.shape(), &[2, 2]);
    assert_eq!(picked.to_vec(), vec![5., 6., 1., 2.]);
}

#[test]
fn test_stack_adds_leading_axis() {
    let a = Tensor::new(&[1., 2.], &[1, 2]);
    let b = Tensor::new(&[3., 4.], &[1, 2]);
    let stacked = Tensor::stack(&[&a, &b]).unwrap();
    assert_eq!(stacked.shape(), &[2, 1, 2]);
    assert_eq!(stacked.to_vec(), vec![1., 2., 3., 4.]);
    assert_eq!(
        Tensor::stack(&[&a, &Tensor::zeros(&[2])]).unwrap_err(),
        TensorError::InconsitentShape
    );
    assert_eq!(Tensor::stack(&[]).unwrap_err(), TensorError::EmptyList);
}
