//! 数据加载模块
//!
//! 提供成对（source/reference）图像数据集与批处理功能。
//!
//! # 主要组件
//!
//! - [`PairedDataset`]: 持有 source 与 reference 图像张量的数据集
//! - [`PairedDataLoader`]: `PyTorch` 风格的成对数据批量加载器
//! - [`PairedBatches`]: 训练器消费的批次来源
//! - [`PairedImageFolder`]: 从`<root>/source`与`<root>/reference`读取图像
//! - [`SyntheticPairs`]: 合成的成对图像（冒烟测试与演示）
//! - [`transforms`]: 图像与张量的互相转换
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use fd_gan::data::{PairedDataLoader, PairedImageFolder};
//!
//! let dataset = PairedImageFolder::new("data/pairs", (64, 64), 3).load()?;
//! let loader = PairedDataLoader::new(dataset, 8)?
//!     .shuffle(true)
//!     .seed(42);
//!
//! for (source, reference) in loader.iter() {
//!     trainer.train_step(&source, &reference)?;
//! }
//! ```

mod dataloader;
pub mod datasets;
pub mod error;
pub mod transforms;

#[cfg(test)]
mod tests;

pub use dataloader::{PairedBatches, PairedDataLoader, PairedDataLoaderIterator, PairedDataset};
pub use datasets::{PairedImageFolder, SyntheticPairs};
pub use error::DataError;
