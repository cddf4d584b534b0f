//! GraphInner 计算图的底层实现
//!
//! 各 impl 块分散在子模块中：
//! - core.rs: 基础查询与节点生命周期
//! - node_builders.rs: new_*_node（即时求值）
//! - backward.rs: VJP 反向传播
//! - mode.rs: train/eval、no_grad
//! - serialization.rs: save_params/load_params

mod backward;
mod core;
mod mode;
mod node_builders;
mod serialization;

use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// 图的完整定义（核心实现）
///
/// 用户通常通过 `Graph` 句柄使用此结构。
pub struct GraphInner {
    pub(in crate::nn::graph) nodes: HashMap<NodeId, NodeHandle>,
    pub(in crate::nn::graph) next_id: u64,
    pub(in crate::nn::graph) is_eval_mode: bool,
    /// 图级别的随机数生成器（参数初始化、噪声采样）
    pub(in crate::nn::graph) rng: StdRng,
}
