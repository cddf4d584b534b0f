//! 梯度流控制机制测试：`detach`、`no_grad`、eval 模式

use crate::nn::{Graph, GraphError, VarActivationOps, VarReduceOps};
use crate::tensor::Tensor;

/// 测试: detach 返回新节点，原节点仍可求导
#[test]
fn test_detach_creates_new_node_and_keeps_original_attached() {
    let graph = Graph::new();
    let p = graph.parameter_from_tensor(&Tensor::new(&[0.2, 0.4], &[1, 2]), "p").unwrap();
    let fake = p.tanh().unwrap();
    let detached = fake.detach().unwrap();

    assert_ne!(detached.node_id(), fake.node_id());
    assert!(detached.is_detached().unwrap());
    assert!(!detached.requires_grad().unwrap());
    assert!(!fake.is_detached().unwrap());
    assert!(fake.requires_grad().unwrap());
    assert_eq!(
        detached.tensor().unwrap().to_vec(),
        fake.tensor().unwrap().to_vec()
    );

    // 仅经过 detach 分支的损失无法反向传播到 p
    let critic = graph.parameter_from_tensor(&Tensor::ones(&[1, 2]), "critic").unwrap();
    let loss = detached.try_mul(&critic).unwrap().mean().unwrap();
    loss.backward().unwrap();
    assert!(p.grad().unwrap().is_none());
    assert!(critic.grad().unwrap().is_some());

    // 原节点未被上一次反向传播释放，仍可参与新的计算并求导
    let loss = fake.try_mul(&critic).unwrap().mean().unwrap();
    loss.backward().unwrap();
    assert!(p.grad().unwrap().is_some());
}

/// 测试: no_grad_scope 内创建的节点不需要梯度，退出后恢复
#[test]
fn test_no_grad_scope() {
    let graph = Graph::new();
    let p = graph.parameter_from_tensor(&Tensor::ones(&[1, 1]), "p").unwrap();

    let inside = graph.no_grad_scope(|| p.sigmoid().unwrap());
    assert!(!inside.requires_grad().unwrap());
    assert!(!graph.is_eval());

    let outside = p.sigmoid().unwrap();
    assert!(outside.requires_grad().unwrap());

    let loss = inside.mean().unwrap();
    assert!(matches!(
        loss.backward(),
        Err(GraphError::InvalidOperation(_))
    ));
}

/// 测试: no_grad_scope 从 eval 模式开始，退出后仍保持 eval
#[test]
fn test_no_grad_scope_from_eval_mode() {
    let graph = Graph::new();
    graph.eval();
    let result = graph.no_grad_scope(|| 42);
    assert_eq!(result, 42);
    assert!(graph.is_eval());
    graph.train();
    assert!(!graph.is_eval());
}
