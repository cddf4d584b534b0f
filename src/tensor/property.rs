//! 本文件仅包含一些属性方法，不包含任何运算方法

use super::Tensor;
use ndarray::{ArrayViewD, IxDyn};
use std::ops::{Index, IndexMut};

impl Tensor {
    pub fn view(&self) -> ArrayViewD<'_, f32> {
        self.data.view()
    }

    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]。
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// 张量的维（dim）数、阶（rank）数
    pub fn dimension(&self) -> usize {
        self.data.ndim()
    }

    /// 张量中所有元素的数量
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 判断两个张量的形状是否严格一致。如：形状为 [1, 4] 和 [4] 是不一致的
    pub fn is_same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// 判断张量是否为标量（只含 1 个元素）
    pub fn is_scalar(&self) -> bool {
        self.size() == 1
    }

    /// 若为标量，则返回Some(number)，否则返回None
    pub fn get_data_number(&self) -> Option<f32> {
        if self.is_scalar() {
            self.data.iter().next().copied()
        } else {
            None
        }
    }

    /// 按逻辑顺序（行优先）拷贝出所有元素
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.data.iter()
    }

    /// 是否所有元素都是有限值（非 NaN、非无穷）
    pub fn is_all_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// 两个张量是否能按 NumPy 规则广播
    pub fn can_broadcast_with(&self, other: &Self) -> bool {
        broadcast_shape(self.shape(), other.shape()).is_some()
    }
}

/// 计算两个形状按 NumPy 规则广播后的形状，不兼容时返回 None
///
/// - 从右向左对齐维度
/// - 每个维度必须相等，或其中一个为 1
pub fn broadcast_shape(shape_1: &[usize], shape_2: &[usize]) -> Option<Vec<usize>> {
    let rank = shape_1.len().max(shape_2.len());
    let mut result = vec![0; rank];
    for i in 0..rank {
        let d1 = if i < rank - shape_1.len() {
            1
        } else {
            shape_1[i - (rank - shape_1.len())]
        };
        let d2 = if i < rank - shape_2.len() {
            1
        } else {
            shape_2[i - (rank - shape_2.len())]
        };
        result[i] = match (d1, d2) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => return None,
        };
    }
    Some(result)
}

impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; N]) -> &f32 {
        &self.data[IxDyn(&index)]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, index: [usize; N]) -> &mut f32 {
        &mut self.data[IxDyn(&index)]
    }
}
