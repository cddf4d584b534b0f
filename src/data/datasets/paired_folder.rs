//! 成对图像目录数据集
//!
//! 目录结构：
//! ```text
//! <root>/
//!   source/     a.png b.png ...
//!   reference/  a.png b.png ...
//! ```
//! 按文件名排序后配对，每个 source 文件都必须有同名的 reference 文件。

use std::fs;
use std::path::{Path, PathBuf};

use crate::data::dataloader::PairedDataset;
use crate::data::error::DataError;
use crate::data::transforms::load_image;
use crate::tensor::Tensor;

/// 支持的图像扩展名（小写）
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// 成对图像目录
#[derive(Debug, Clone)]
pub struct PairedImageFolder {
    root: PathBuf,
    /// (height, width)
    size: (u32, u32),
    channels: usize,
}

impl PairedImageFolder {
    /// # 参数
    /// - `root`: 包含`source`与`reference`子目录的根目录
    /// - `size`: 统一缩放到的(height, width)
    /// - `channels`: 1（灰度）或 3（RGB）
    pub fn new<P: AsRef<Path>>(root: P, size: (u32, u32), channels: usize) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            size,
            channels,
        }
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join("source")
    }

    pub fn reference_dir(&self) -> PathBuf {
        self.root.join("reference")
    }

    /// 读取所有图像对，返回形状为`[N, C, H, W]`的数据集
    pub fn load(&self) -> Result<PairedDataset, DataError> {
        let source_dir = self.source_dir();
        let reference_dir = self.reference_dir();
        for dir in [&source_dir, &reference_dir] {
            if !dir.is_dir() {
                return Err(DataError::FileNotFound(dir.clone()));
            }
        }

        let files = list_images(&source_dir)?;
        if files.is_empty() {
            return Err(DataError::Empty(format!(
                "{}中没有图像文件",
                source_dir.display()
            )));
        }

        let mut sources = Vec::with_capacity(files.len());
        let mut references = Vec::with_capacity(files.len());
        for file_name in &files {
            let reference_path = reference_dir.join(file_name);
            if !reference_path.is_file() {
                return Err(DataError::FileNotFound(reference_path));
            }
            sources.push(load_image(&source_dir.join(file_name), self.size, self.channels)?);
            references.push(load_image(&reference_path, self.size, self.channels)?);
        }

        tracing::info!(
            root = %self.root.display(),
            pairs = files.len(),
            height = self.size.0,
            width = self.size.1,
            channels = self.channels,
            "已加载成对图像数据集"
        );

        let sources = Tensor::stack(&sources.iter().collect::<Vec<_>>())?;
        let references = Tensor::stack(&references.iter().collect::<Vec<_>>())?;
        PairedDataset::new(sources, references)
    }
}

/// 列出目录下的图像文件名（按文件名排序）
fn list_images(dir: &Path) -> Result<Vec<String>, DataError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if !is_image {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
