//! Var 扩展 trait 模块
//!
//! 按功能领域组织 Var 的扩展方法，用户按需 import。
//!
//! # 模块结构
//! - `activation`: 激活函数（sigmoid, tanh, leaky_relu）
//! - `frequency`: 频域变换（dct2d）
//! - `loss`: 损失函数（bce_with_logits, mse_loss）
//! - `matrix`: 矩阵与卷积（matmul, conv2d）
//! - `reduce`: 归约（mean）
//! - `shape`: 形状变换（reshape, flatten, concat）

mod activation;
mod frequency;
mod loss;
mod matrix;
mod reduce;
mod shape;

pub use activation::VarActivationOps;
pub use frequency::VarFrequencyOps;
pub use loss::VarLossOps;
pub use matrix::VarMatrixOps;
pub use reduce::VarReduceOps;
pub use shape::VarShapeOps;
