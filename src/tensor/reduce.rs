//! 张量的归约运算（求和、均值，以及广播的逆运算 sum_to_shape）

use super::Tensor;
use crate::errors::TensorError;
use ndarray::Axis;

impl Tensor {
    /// 所有元素之和
    pub fn sum_all(&self) -> f32 {
        self.data.sum()
    }

    /// 所有元素的均值（空张量返回 0）
    pub fn mean_all(&self) -> f32 {
        if self.size() == 0 {
            return 0.0;
        }
        self.sum_all() / self.size() as f32
    }

    /// 沿某一轴求和，并保留该轴（长度变为 1）
    pub fn sum_axis_keepdims(&self, axis: usize) -> Result<Tensor, TensorError> {
        if axis >= self.dimension() {
            return Err(TensorError::AxisOutOfRange {
                axis,
                rank: self.dimension(),
            });
        }
        let summed = self.data.sum_axis(Axis(axis)).insert_axis(Axis(axis));
        Ok(Tensor::from_array(summed))
    }

    /// 将（广播得到的）张量求和还原为`target`形状，是广播的逆运算。
    /// 反向传播时，父节点的梯度需要通过它还原到父节点自身的形状：
    /// - 多出的前导维度全部求和消去；
    /// - 目标维度为 1 而当前维度大于 1 时，沿该维度求和并保留维度。
    pub fn sum_to_shape(&self, target: &[usize]) -> Result<Tensor, TensorError> {
        if self.shape() == target {
            return Ok(self.clone());
        }
        let rank = self.dimension();
        if target.len() > rank {
            return Err(TensorError::IncompatibleShape);
        }

        let mut data = self.data.clone();
        for _ in 0..rank - target.len() {
            data = data.sum_axis(Axis(0));
        }
        for (axis, &dim) in target.iter().enumerate() {
            let current = data.shape()[axis];
            if dim == current {
                continue;
            }
            if dim != 1 {
                return Err(TensorError::IncompatibleShape);
            }
            data = data.sum_axis(Axis(axis)).insert_axis(Axis(axis));
        }
        Ok(Tensor::from_array(data))
    }
}
