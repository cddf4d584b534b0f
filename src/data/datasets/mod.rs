//! 内置数据集
//!
//! - 成对图像目录：`<root>/source/*`与`<root>/reference/*`按文件名配对
//! - 合成成对图像：无需磁盘数据

mod paired_folder;
mod synthetic;

pub use paired_folder::PairedImageFolder;
pub use synthetic::SyntheticPairs;
