use crate::errors::TensorError;
use crate::tensor::Tensor;

#[test]
fn test_new_and_index() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(tensor.shape(), &[2, 3]);
    assert_eq!(tensor.dimension(), 2);
    assert_eq!(tensor.size(), 6);
    assert_eq!(tensor[[1, 2]], 6.);
    assert_eq!(tensor[[0, 1]], 2.);
}

#[test]
fn test_try_new_with_mismatched_len() {
    let result = Tensor::try_new(&[1., 2., 3.], &[2, 2]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::DataShapeMismatch {
            len: 3,
            shape: vec![2, 2]
        }
    );
}

#[test]
#[should_panic(expected = "数据长度3与形状[2, 2]的元素个数不一致")]
fn test_new_panics_with_mismatched_len() {
    let _ = Tensor::new(&[1., 2., 3.], &[2, 2]);
}

#[test]
fn test_is_scalar() {
    assert!(Tensor::new(&[1.], &[]).is_scalar());
    assert!(Tensor::new(&[1.], &[1, 1]).is_scalar());
    assert!(!Tensor::new(&[1., 2.], &[2]).is_scalar());
    assert_eq!(Tensor::new(&[3.5], &[1, 1]).get_data_number(), Some(3.5));
    assert_eq!(Tensor::new(&[1., 2.], &[2]).get_data_number(), None);
}

#[test]
fn test_full_zeros_ones() {
    assert!(Tensor::zeros(&[2, 3]).iter().all(|&x| x == 0.));
    assert!(Tensor::ones(&[4]).iter().all(|&x| x == 1.));
    assert!(Tensor::full(0.5, &[2, 2]).iter().all(|&x| x == 0.5));
    let like = Tensor::new(&[1., 2.], &[2, 1]).zeros_like();
    assert_eq!(like.shape(), &[2, 1]);
}

#[test]
fn test_uniform_in_range() {
    let tensor = Tensor::uniform(-0.5, 0.5, &[10, 10]);
    assert!(tensor.iter().all(|&x| (-0.5..=0.5).contains(&x)));
}

#[test]
fn test_normal_seeded_is_reproducible() {
    let a = Tensor::normal_seeded(0., 1., &[3, 7], 42);
    let b = Tensor::normal_seeded(0., 1., &[3, 7], 42);
    let c = Tensor::normal_seeded(0., 1., &[3, 7], 43);
    assert_eq!(a.to_vec(), b.to_vec());
    assert_ne!(a.to_vec(), c.to_vec());
    assert!(a.is_all_finite());
}

#[test]
fn test_normal_statistics() {
    let tensor = Tensor::normal_seeded(1.0, 2.0, &[20000], 7);
    let mean = tensor.mean_all();
    let var = (&tensor - mean).square().mean_all();
    assert!((mean - 1.0).abs() < 0.05, "均值偏差过大：{mean}");
    assert!((var - 4.0).abs() < 0.2, "方差偏差过大：{var}");
}
