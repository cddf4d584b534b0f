//! Module trait 定义

use super::Var;

/// 模块 trait
///
/// # 设计原则
/// - `forward()` **不是** trait 方法（签名各异）
/// - `new()` **不是** trait 方法（参数各异）
/// - `parameters()` 返回 `Vec<Var>`（签名一致，放入 trait）
/// - 由于 Var 携带图引用，`forward()` 不需要 `&Graph` 参数
///
/// # 使用示例
///
/// ```ignore
/// struct Critic {
///     down: Conv2d,
///     head: Conv2d,
/// }
///
/// impl Module for Critic {
///     fn parameters(&self) -> Vec<Var> {
///         [self.down.parameters(), self.head.parameters()].concat()
///     }
/// }
/// ```
pub trait Module {
    /// 获取所有可训练参数（优化器据此绑定要更新的参数）
    fn parameters(&self) -> Vec<Var>;

    /// 获取参数张量个数
    fn num_params(&self) -> usize {
        self.parameters().len()
    }

    /// 获取参数的标量元素总数
    fn num_scalars(&self) -> usize {
        self.parameters()
            .iter()
            .filter_map(|p| p.shape().ok())
            .map(|shape| shape.iter().product::<usize>())
            .sum()
    }
}
