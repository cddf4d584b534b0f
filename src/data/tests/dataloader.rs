use crate::data::{DataError, PairedBatches, PairedDataLoader, PairedDataset};
use crate::tensor::Tensor;

/// 构造 n 个 1×1×2 的样本，source 第 i 个样本的值为 i，reference 为 -i
fn indexed_dataset(n: usize) -> PairedDataset {
    let source: Vec<f32> = (0..n).flat_map(|i| [i as f32, i as f32]).collect();
    let reference: Vec<f32> = source.iter().map(|v| -v).collect();
    PairedDataset::new(
        Tensor::new(&source, &[n, 1, 1, 2]),
        Tensor::new(&reference, &[n, 1, 1, 2]),
    )
    .unwrap()
}

#[test]
fn test_paired_dataset_validates_shapes() {
    let ok = PairedDataset::new(Tensor::zeros(&[3, 1, 4, 4]), Tensor::zeros(&[3, 1, 4, 4])).unwrap();
    assert_eq!(ok.len(), 3);
    assert_eq!(ok.sample_shape(), &[1, 4, 4]);

    assert!(matches!(
        PairedDataset::new(Tensor::zeros(&[3, 1, 4, 4]), Tensor::zeros(&[3, 1, 4, 5])),
        Err(DataError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        PairedDataset::new(Tensor::zeros(&[3, 16]), Tensor::zeros(&[3, 16])),
        Err(DataError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_loader_batches_in_order() {
    let loader = PairedDataLoader::new(indexed_dataset(5), 2).unwrap();
    assert_eq!(loader.num_batches(), 3);

    let batches: Vec<_> = loader.iter().collect();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].0.shape(), &[2, 1, 1, 2]);
    assert_eq!(batches[2].0.shape(), &[1, 1, 1, 2]);
    assert_eq!(batches[1].0.to_vec(), vec![2., 2., 3., 3.]);
}

#[test]
fn test_loader_drop_last() {
    let loader = PairedDataLoader::new(indexed_dataset(5), 2).unwrap().drop_last(true);
    assert_eq!(loader.num_batches(), 2);
    assert_eq!(loader.batches().count(), 2);
}

#[test]
fn test_shuffle_keeps_pairs_aligned_and_is_reproducible() {
    let loader = PairedDataLoader::new(indexed_dataset(8), 3)
        .unwrap()
        .shuffle(true)
        .seed(42);
    let first: Vec<f32> = loader.iter().flat_map(|(s, _)| s.to_vec()).collect();
    let second: Vec<f32> = loader.iter().flat_map(|(s, _)| s.to_vec()).collect();
    assert_eq!(first, second);

    let mut seen: Vec<f32> = first.iter().step_by(2).copied().collect();
    seen.sort_by(f32::total_cmp);
    assert_eq!(seen, (0..8).map(|i| i as f32).collect::<Vec<_>>());

    for (source, reference) in loader.iter() {
        let negated: Vec<f32> = reference.to_vec().iter().map(|v| -v).collect();
        assert_eq!(source.to_vec(), negated);
    }
}

#[test]
fn test_zero_batch_size_is_rejected() {
    assert!(matches!(
        PairedDataLoader::new(indexed_dataset(2), 0),
        Err(DataError::InvalidArgument(_))
    ));
}
