use crate::fd_gan::{BlendGenerator, Discriminator, ImageBlender, ImageCritic, ImageTransfer, TransferGenerator};
use crate::nn::{Graph, GraphError, Module};
use crate::tensor::Tensor;

fn image(graph: &Graph, shape: &[usize], seed: u64) -> crate::nn::Var {
    graph
        .input(&Tensor::normal_seeded(0.0, 0.5, shape, seed))
        .unwrap()
}

#[test]
fn test_blend_output_is_mask_weighted_mix() {
    let graph = Graph::new_with_seed(1);
    let blend = BlendGenerator::new(&graph, 3, 4, "blend").unwrap();
    let noise = image(&graph, &[2, 3, 6, 5], 1);
    let source = image(&graph, &[2, 3, 6, 5], 2);
    let reference = image(&graph, &[2, 3, 6, 5], 3);

    let (fake, mask) = blend.blend(&noise, &source, &reference).unwrap();
    assert_eq!(fake.shape().unwrap(), vec![2, 3, 6, 5]);
    assert_eq!(mask.shape().unwrap(), vec![2, 1, 6, 5]);

    let mask = mask.tensor().unwrap();
    assert!(mask.iter().all(|m| (0.0..=1.0).contains(m)));

    // fake 与 reference 之差不超过 mask · (|synth| + |reference|) ≤ mask · (1 + |reference|)
    let fake = fake.tensor().unwrap();
    let reference = reference.tensor().unwrap();
    for b in 0..2 {
        for c in 0..3 {
            for y in 0..6 {
                for x in 0..5 {
                    let m = mask[[b, 0, y, x]];
                    let r = reference[[b, c, y, x]];
                    let diff = (fake[[b, c, y, x]] - r).abs();
                    assert!(diff <= m * (1.0 + r.abs()) + 1e-5);
                }
            }
        }
    }
}

#[test]
fn test_blend_rejects_mismatched_pair() {
    let graph = Graph::new();
    let blend = BlendGenerator::new(&graph, 1, 4, "blend").unwrap();
    let noise = image(&graph, &[1, 1, 4, 4], 1);
    let source = image(&graph, &[1, 1, 4, 4], 2);
    let reference = image(&graph, &[1, 1, 4, 5], 3);
    assert!(matches!(
        blend.blend(&noise, &source, &reference),
        Err(GraphError::ShapeMismatch { .. })
    ));

    let rgb = image(&graph, &[1, 3, 4, 4], 4);
    assert!(matches!(
        blend.blend(&noise, &rgb, &rgb),
        Err(GraphError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_transfer_generator_output_range() {
    let graph = Graph::new_with_seed(2);
    let transfer = TransferGenerator::new(&graph, 3, 4, "transfer").unwrap();
    let source = image(&graph, &[1, 3, 5, 5], 5);
    let reference = image(&graph, &[1, 3, 5, 5], 6);
    let out = transfer.transfer(&source, &reference).unwrap().tensor().unwrap();
    assert_eq!(out.shape(), &[1, 3, 5, 5]);
    assert!(out.iter().all(|v| v.abs() <= 1.0));
    assert_eq!(transfer.num_params(), 4);
}

#[test]
fn test_discriminator_outputs_one_logit_per_sample_and_branch() {
    let graph = Graph::new_with_seed(3);
    let dis = Discriminator::new(&graph, 1, 4, "dis").unwrap();
    let (spatial, frequency) = dis.critique(&image(&graph, &[3, 1, 8, 8], 7)).unwrap();
    assert_eq!(spatial.shape().unwrap(), vec![3, 1]);
    assert_eq!(frequency.shape().unwrap(), vec![3, 1]);
    // 两条分支各 3 层卷积（卷积核 + 偏置）
    assert_eq!(dis.num_params(), 12);
}

#[test]
fn test_branches_give_independent_logits() {
    let graph = Graph::new_with_seed(4);
    let dis = Discriminator::new(&graph, 1, 4, "dis").unwrap();
    let (spatial, frequency) = dis.critique(&image(&graph, &[1, 1, 6, 6], 8)).unwrap();
    let s = spatial.item().unwrap();
    let f = frequency.item().unwrap();
    assert!(s.is_finite() && f.is_finite());
    assert_ne!(s, f);
}
