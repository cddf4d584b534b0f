//! PairedDataLoader - PyTorch 风格的成对图像批量加载器
//!
//! 提供统一的数据迭代 API，支持：
//! - 自动分批 (batch_size)
//! - 随机打乱 (shuffle)
//! - 丢弃不完整批次 (drop_last)
//! source 与 reference 使用同一组索引，保证配对关系不被打乱。

use crate::data::error::DataError;
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::seq::SliceRandom;

/// PairedDataset - 持有成对图像的数据集
///
/// source 与 reference 均为`[N, C, H, W]`，且形状完全一致
#[derive(Debug, Clone)]
pub struct PairedDataset {
    sources: Tensor,
    references: Tensor,
}

impl PairedDataset {
    /// 创建新的 PairedDataset
    ///
    /// # 参数
    /// - `sources`: source 图像张量，第一维为样本数
    /// - `references`: reference 图像张量，形状必须与`sources`一致
    pub fn new(sources: Tensor, references: Tensor) -> Result<Self, DataError> {
        if sources.dimension() != 4 {
            return Err(DataError::ShapeMismatch {
                expected: vec![0, 0, 0, 0],
                got: sources.shape().to_vec(),
            });
        }
        if !sources.is_same_shape(&references) {
            return Err(DataError::ShapeMismatch {
                expected: sources.shape().to_vec(),
                got: references.shape().to_vec(),
            });
        }
        Ok(Self {
            sources,
            references,
        })
    }

    /// 获取样本数量
    pub fn len(&self) -> usize {
        self.sources.shape()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 单个样本的形状`[C, H, W]`
    pub fn sample_shape(&self) -> &[usize] {
        &self.sources.shape()[1..]
    }

    pub const fn sources(&self) -> &Tensor {
        &self.sources
    }

    pub const fn references(&self) -> &Tensor {
        &self.references
    }
}

/// 训练器消费的成对批次来源
pub trait PairedBatches {
    /// 每个 epoch 的批次数
    fn num_batches(&self) -> usize;

    /// 遍历一个 epoch 的所有批次`(source, reference)`
    fn batches(&self) -> Box<dyn Iterator<Item = (Tensor, Tensor)> + '_>;
}

/// PairedDataLoader - PyTorch 风格的成对数据批量加载器
///
/// # 示例
/// ```ignore
/// let loader = PairedDataLoader::new(dataset, 8)?
///     .shuffle(true)
///     .drop_last(true);
///
/// for (source, reference) in loader.iter() {
///     trainer.train_step(&source, &reference)?;
/// }
/// ```
pub struct PairedDataLoader {
    dataset: PairedDataset,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
}

impl PairedDataLoader {
    /// 创建新的 PairedDataLoader，`batch_size`必须大于 0
    pub fn new(dataset: PairedDataset, batch_size: usize) -> Result<Self, DataError> {
        if batch_size == 0 {
            return Err(DataError::InvalidArgument(
                "PairedDataLoader: batch_size 必须大于 0".to_string(),
            ));
        }
        Ok(Self {
            dataset,
            batch_size,
            shuffle: false,
            drop_last: false,
            seed: None,
        })
    }

    /// 设置是否打乱数据
    pub const fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// 设置是否丢弃最后一个不完整的批次
    pub const fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// 设置随机种子（用于 shuffle）
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 获取数据集大小
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub const fn dataset(&self) -> &PairedDataset {
        &self.dataset
    }

    /// 创建迭代器。固定种子时每次迭代的顺序都相同。
    pub fn iter(&self) -> PairedDataLoaderIterator<'_> {
        let mut indices: Vec<usize> = (0..self.dataset.len()).collect();
        if self.shuffle {
            if let Some(seed) = self.seed {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                indices.shuffle(&mut rng);
            } else {
                let mut rng = rand::thread_rng();
                indices.shuffle(&mut rng);
            }
        }

        PairedDataLoaderIterator {
            loader: self,
            indices,
            current_batch: 0,
        }
    }
}

impl PairedBatches for PairedDataLoader {
    fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    fn batches(&self) -> Box<dyn Iterator<Item = (Tensor, Tensor)> + '_> {
        Box::new(self.iter())
    }
}

/// PairedDataLoader 迭代器
pub struct PairedDataLoaderIterator<'a> {
    loader: &'a PairedDataLoader,
    indices: Vec<usize>,
    current_batch: usize,
}

impl Iterator for PairedDataLoaderIterator<'_> {
    type Item = (Tensor, Tensor);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.loader.dataset.len();
        let batch_size = self.loader.batch_size;
        let start = self.current_batch * batch_size;
        if start >= n {
            return None;
        }

        let end = (start + batch_size).min(n);
        // 如果 drop_last 且批次不完整，则结束
        if self.loader.drop_last && end - start < batch_size {
            return None;
        }
        self.current_batch += 1;

        let batch_indices = &self.indices[start..end];
        let dataset = &self.loader.dataset;
        Some((
            dataset.sources.select_samples(batch_indices),
            dataset.references.select_samples(batch_indices),
        ))
    }
}
