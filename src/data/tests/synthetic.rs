use crate::data::{DataError, SyntheticPairs};

#[test]
fn test_synthetic_pairs_shape_and_range() {
    let dataset = SyntheticPairs::new(4, 3, 8, 6).seed(1).generate().unwrap();
    assert_eq!(dataset.sources().shape(), &[4, 3, 8, 6]);
    assert_eq!(dataset.references().shape(), &[4, 3, 8, 6]);
    assert!(dataset.sources().iter().all(|v| (-1.0..=1.0).contains(v)));
    assert!(dataset.references().iter().all(|v| (-1.0..=1.0).contains(v)));
}

#[test]
fn test_synthetic_pairs_are_seeded() {
    let a = SyntheticPairs::new(2, 1, 4, 4).seed(7).generate().unwrap();
    let b = SyntheticPairs::new(2, 1, 4, 4).seed(7).generate().unwrap();
    let c = SyntheticPairs::new(2, 1, 4, 4).seed(8).generate().unwrap();
    assert_eq!(a.sources().to_vec(), b.sources().to_vec());
    assert_ne!(a.sources().to_vec(), c.sources().to_vec());
    assert_ne!(a.sources().to_vec(), a.references().to_vec());
}

#[test]
fn test_synthetic_pairs_reject_empty_size() {
    assert!(matches!(
        SyntheticPairs::new(0, 1, 4, 4).generate(),
        Err(DataError::Empty(_))
    ));
}
