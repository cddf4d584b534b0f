use proptest::prelude::*;

use crate::errors::TensorError;
use crate::tensor::Tensor;

#[test]
fn test_sum_and_mean() {
    let tensor = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    assert_eq!(tensor.sum_all(), 10.);
    assert_eq!(tensor.mean_all(), 2.5);
    assert_eq!(Tensor::zeros(&[0]).mean_all(), 0.);
}

#[test]
fn test_sum_axis_keepdims() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let rows = tensor.sum_axis_keepdims(1).unwrap();
    assert_eq!(rows.shape(), &[2, 1]);
    assert_eq!(rows.to_vec(), vec![6., 15.]);
    assert_eq!(
        tensor.sum_axis_keepdims(2).unwrap_err(),
        TensorError::AxisOutOfRange { axis: 2, rank: 2 }
    );
}

#[test]
fn test_sum_to_shape_reduces_broadcast_axes() {
    let grad = Tensor::ones(&[2, 3, 4]);
    assert_eq!(grad.sum_to_shape(&[4]).unwrap().to_vec(), vec![6.; 4]);
    let kept = grad.sum_to_shape(&[3, 1]).unwrap();
    assert_eq!(kept.shape(), &[3, 1]);
    assert_eq!(kept.to_vec(), vec![8.; 3]);
    assert_eq!(grad.sum_to_shape(&[1, 1, 1]).unwrap().to_vec(), vec![24.]);
}

#[test]
fn test_sum_to_shape_with_incompatible_target() {
    let grad = Tensor::ones(&[2, 3]);
    assert_eq!(
        grad.sum_to_shape(&[2]).unwrap_err(),
        TensorError::IncompatibleShape
    );
    assert_eq!(
        grad.sum_to_shape(&[1, 2, 3]).unwrap_err(),
        TensorError::IncompatibleShape
    );
}

proptest! {
    /// 广播相加后再 sum_to_shape 还原，形状必须回到原形状且总和守恒
    #[test]
    fn prop_sum_to_shape_inverts_broadcast(rows in 1usize..5, cols in 1usize..5, keep_rows in any::<bool>()) {
        let small_shape = if keep_rows { vec![rows, 1] } else { vec![cols] };
        let small = Tensor::ones(&small_shape);
        let big = &Tensor::zeros(&[rows, cols]) + &small;
        let reduced = big.sum_to_shape(&small_shape).unwrap();
        prop_assert_eq!(reduced.shape(), &small_shape[..]);
        prop_assert!((reduced.sum_all() - big.sum_all()).abs() < 1e-4);
    }
}
