use crate::tensor::Tensor;

#[test]
fn test_print_matrix() {
    let tensor = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    let printed = format!("{tensor}");
    assert!(printed.starts_with("[[  1.0000,   2.0000], \n [  3.0000,   4.0000]]"));
    assert!(printed.contains("形状: [2, 2]"));
}

#[test]
fn test_print_high_rank_shows_summary() {
    let tensor = Tensor::ones(&[1, 2, 2, 2]);
    let printed = format!("{tensor}");
    assert!(printed.contains("形状：[1, 2, 2, 2]"));
    assert!(printed.contains("均值：1.0000"));
}
