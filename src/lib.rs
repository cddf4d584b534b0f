//! # FD-GAN
//!
//! 用纯 rust 实现的 FD-GAN 训练器：两个生成器（blend / transfer）与一个同时在
//! 空间域和频域（二维 DCT）给出判别结果的判别器，交替进行对抗训练。
//!
//! 项目自带一个轻量的动态计算图运行时：
//! - [`tensor`]: 基于 ndarray 的 f32 张量
//! - [`nn`]: 计算图、自动求导（VJP）、卷积层与 Adam 优化器
//! - [`data`]: 成对图像数据集与数据加载器
//! - [`fd_gan`]: 网络结构、对抗损失与训练器
//! - [`logging`]: tracing 日志初始化

pub mod data;
pub mod errors;
pub mod fd_gan;
pub mod logging;
pub mod nn;
pub mod tensor;
