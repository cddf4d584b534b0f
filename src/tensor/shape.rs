//! 张量的形状变换：reshape、沿轴拼接与拆分、批次拼接

use super::Tensor;
use crate::errors::{Operator, TensorError};
use ndarray::{Array, Axis, IxDyn, Slice, concatenate};

impl Tensor {
    /// 改变形状（元素个数必须一致）
    pub fn reshape(&self, shape: &[usize]) -> Result<Tensor, TensorError> {
        if shape.iter().product::<usize>() != self.size() {
            return Err(TensorError::DataShapeMismatch {
                len: self.size(),
                shape: shape.to_vec(),
            });
        }
        let data = Array::from_shape_vec(IxDyn(shape), self.to_vec()).map_err(|_| {
            TensorError::DataShapeMismatch {
                len: self.size(),
                shape: shape.to_vec(),
            }
        })?;
        Ok(Tensor::from_array(data))
    }

    /// 沿`axis`拼接多个张量，除`axis`外其余维度必须一致
    pub fn concat(tensors: &[&Tensor], axis: usize) -> Result<Tensor, TensorError> {
        let first = tensors.first().ok_or(TensorError::EmptyList)?;
        if axis >= first.dimension() {
            return Err(TensorError::AxisOutOfRange {
                axis,
                rank: first.dimension(),
            });
        }
        for other in &tensors[1..] {
            let compatible = other.dimension() == first.dimension()
                && first
                    .shape()
                    .iter()
                    .zip(other.shape())
                    .enumerate()
                    .all(|(i, (a, b))| i == axis || a == b);
            if !compatible {
                return Err(TensorError::OperatorError {
                    operator: Operator::Concat,
                    tensor1_shape: first.shape().to_vec(),
                    tensor2_shape: other.shape().to_vec(),
                });
            }
        }
        let views = tensors.iter().map(|t| t.data.view()).collect::<Vec<_>>();
        let data = concatenate(Axis(axis), &views).map_err(|_| TensorError::InconsitentShape)?;
        Ok(Tensor::from_array(data))
    }

    /// 沿`axis`按`sizes`拆分，`sizes`之和必须等于该轴长度
    pub fn split(&self, axis: usize, sizes: &[usize]) -> Result<Vec<Tensor>, TensorError> {
        if axis >= self.dimension() {
            return Err(TensorError::AxisOutOfRange {
                axis,
                rank: self.dimension(),
            });
        }
        if sizes.iter().sum::<usize>() != self.shape()[axis] {
            return Err(TensorError::IncompatibleShape);
        }
        let mut start = 0;
        let mut parts = Vec::with_capacity(sizes.len());
        for &size in sizes {
            let part = self
                .data
                .slice_axis(Axis(axis), Slice::from(start..start + size))
                .to_owned();
            parts.push(Tensor::from_array(part));
            start += size;
        }
        Ok(parts)
    }

    /// 取出第0维上`index`处的样本，并保留长度为 1 的批次维度
    pub fn sample_at(&self, index: usize) -> Result<Tensor, TensorError> {
        if self.dimension() == 0 || index >= self.shape()[0] {
            return Err(TensorError::IncompatibleShape);
        }
        let part = self
            .data
            .slice_axis(Axis(0), Slice::from(index..index + 1))
            .to_owned();
        Ok(Tensor::from_array(part))
    }

    /// 按`indices`取出第0维上的样本组成新批次（索引越界时 panic，与 ndarray 的`select`一致）
    pub fn select_samples(&self, indices: &[usize]) -> Tensor {
        Tensor::from_array(self.data.select(Axis(0), indices))
    }

    /// 把形状相同的多个样本沿新的第0维堆叠：n 个`[d1, d2, ...]` → `[n, d1, d2, ...]`
    pub fn stack(tensors: &[&Tensor]) -> Result<Tensor, TensorError> {
        let first = tensors.first().ok_or(TensorError::EmptyList)?;
        if tensors.iter().any(|t| !t.is_same_shape(first)) {
            return Err(TensorError::InconsitentShape);
        }
        let mut shape = vec![tensors.len()];
        shape.extend_from_slice(first.shape());
        let data: Vec<f32> = tensors.iter().flat_map(|t| t.to_vec()).collect();
        Tensor::try_new(&data, &shape)
    }
}
