//! 2D 卷积节点（PyTorch 风格）
//!
//! 父节点：input [batch, C_in, H, W]，kernel [C_out, C_in, kH, kW]
//! 输出：[batch, C_out, H', W']，H' = (H + 2·pad_h - kH) / stride_h + 1
//! 偏置不在本节点中处理，由层通过广播加法[1, C_out, 1, 1]实现。
//! 前向与反向均以 Rayon 在 batch 维上并行，结果按样本顺序收集，保证确定性。

use super::super::{TraitNode, expect_parents};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use rayon::prelude::*;

pub(in crate::nn) struct Conv2d {
    stride: (usize, usize),
    padding: (usize, usize),
}

/// 卷积相关的各维度尺寸
#[derive(Clone, Copy)]
struct ConvDims {
    batch: usize,
    in_c: usize,
    in_h: usize,
    in_w: usize,
    out_c: usize,
    k_h: usize,
    k_w: usize,
    out_h: usize,
    out_w: usize,
}

impl Conv2d {
    pub(in crate::nn) fn new(
        parents: &[&Tensor],
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, GraphError> {
        expect_parents("Conv2d", parents, 2)?;
        if stride.0 == 0 || stride.1 == 0 {
            return Err(GraphError::InvalidOperation(
                "Conv2d的步长必须大于0".to_string(),
            ));
        }
        let node = Self { stride, padding };
        node.dims(parents[0], parents[1])?;
        Ok(node)
    }

    fn dims(&self, input: &Tensor, kernel: &Tensor) -> Result<ConvDims, GraphError> {
        if input.dimension() != 4 || kernel.dimension() != 4 {
            return Err(GraphError::ShapeMismatch {
                expected: vec![0, 0, 0, 0],
                got: if input.dimension() != 4 {
                    input.shape().to_vec()
                } else {
                    kernel.shape().to_vec()
                },
                message: "Conv2d的输入和卷积核都必须是4阶张量".to_string(),
            });
        }
        let (i, k) = (input.shape(), kernel.shape());
        if i[1] != k[1] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![k[1]],
                got: vec![i[1]],
                message: "Conv2d输入通道数与卷积核输入通道数不一致".to_string(),
            });
        }
        let (pad_h, pad_w) = self.padding;
        let (padded_h, padded_w) = (i[2] + 2 * pad_h, i[3] + 2 * pad_w);
        if k[2] > padded_h || k[3] > padded_w {
            return Err(GraphError::ShapeMismatch {
                expected: vec![padded_h, padded_w],
                got: vec![k[2], k[3]],
                message: "Conv2d卷积核大于（填充后的）输入".to_string(),
            });
        }
        Ok(ConvDims {
            batch: i[0],
            in_c: i[1],
            in_h: i[2],
            in_w: i[3],
            out_c: k[0],
            k_h: k[2],
            k_w: k[3],
            out_h: (padded_h - k[2]) / self.stride.0 + 1,
            out_w: (padded_w - k[3]) / self.stride.1 + 1,
        })
    }

    /// 输出位置(oh, ow)与卷积核位置(kh, kw)对应的原始输入坐标，落在填充区时返回 None
    fn source_index(&self, d: &ConvDims, oh: usize, ow: usize, kh: usize, kw: usize) -> Option<(usize, usize)> {
        let h = (oh * self.stride.0 + kh) as isize - self.padding.0 as isize;
        let w = (ow * self.stride.1 + kw) as isize - self.padding.1 as isize;
        if h < 0 || w < 0 || h >= d.in_h as isize || w >= d.in_w as isize {
            None
        } else {
            Some((h as usize, w as usize))
        }
    }
}

impl TraitNode for Conv2d {
    fn kind(&self) -> &'static str {
        "Conv2d"
    }

    fn calc_value(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let (input, kernel) = (parents[0], parents[1]);
        let d = self.dims(input, kernel)?;
        let sample_size = d.out_c * d.out_h * d.out_w;

        let batch_results: Vec<Vec<f32>> = (0..d.batch)
            .into_par_iter()
            .map(|b| {
                let mut sample = vec![0.0f32; sample_size];
                for oc in 0..d.out_c {
                    for oh in 0..d.out_h {
                        for ow in 0..d.out_w {
                            let mut sum = 0.0f32;
                            for ic in 0..d.in_c {
                                for kh in 0..d.k_h {
                                    for kw in 0..d.k_w {
                                        if let Some((h, w)) = self.source_index(&d, oh, ow, kh, kw) {
                                            sum += input[[b, ic, h, w]] * kernel[[oc, ic, kh, kw]];
                                        }
                                    }
                                }
                            }
                            sample[oc * d.out_h * d.out_w + oh * d.out_w + ow] = sum;
                        }
                    }
                }
                sample
            })
            .collect();

        let all_data: Vec<f32> = batch_results.into_iter().flatten().collect();
        Ok(Tensor::try_new(&all_data, &[d.batch, d.out_c, d.out_h, d.out_w])?)
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let (input, kernel) = (parents[0], parents[1]);
        let d = self.dims(input, kernel)?;

        if parent_index == 0 {
            // dL/dX：每个输出位置把梯度按卷积核权重散布回输入
            let sample_size = d.in_c * d.in_h * d.in_w;
            let batch_results: Vec<Vec<f32>> = (0..d.batch)
                .into_par_iter()
                .map(|b| {
                    let mut sample_grad = vec![0.0f32; sample_size];
                    for oc in 0..d.out_c {
                        for oh in 0..d.out_h {
                            for ow in 0..d.out_w {
                                let grad_val = upstream_grad[[b, oc, oh, ow]];
                                for ic in 0..d.in_c {
                                    for kh in 0..d.k_h {
                                        for kw in 0..d.k_w {
                                            if let Some((h, w)) = self.source_index(&d, oh, ow, kh, kw) {
                                                sample_grad[ic * d.in_h * d.in_w + h * d.in_w + w] +=
                                                    grad_val * kernel[[oc, ic, kh, kw]];
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    sample_grad
                })
                .collect();

            let all_data: Vec<f32> = batch_results.into_iter().flatten().collect();
            Ok(Tensor::try_new(&all_data, input.shape())?)
        } else {
            // dL/dK：各样本分别计算后按样本顺序累加
            let kernel_size = d.out_c * d.in_c * d.k_h * d.k_w;
            let batch_kernel_grads: Vec<Vec<f32>> = (0..d.batch)
                .into_par_iter()
                .map(|b| {
                    let mut sample_grad = vec![0.0f32; kernel_size];
                    for oc in 0..d.out_c {
                        for oh in 0..d.out_h {
                            for ow in 0..d.out_w {
                                let grad_val = upstream_grad[[b, oc, oh, ow]];
                                for ic in 0..d.in_c {
                                    for kh in 0..d.k_h {
                                        for kw in 0..d.k_w {
                                            if let Some((h, w)) = self.source_index(&d, oh, ow, kh, kw) {
                                                let idx = ((oc * d.in_c + ic) * d.k_h + kh) * d.k_w + kw;
                                                sample_grad[idx] += grad_val * input[[b, ic, h, w]];
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    sample_grad
                })
                .collect();

            let mut total = vec![0.0f32; kernel_size];
            for sample_grad in batch_kernel_grads {
                for (acc, g) in total.iter_mut().zip(sample_grad) {
                    *acc += g;
                }
            }
            Ok(Tensor::try_new(&total, kernel.shape())?)
        }
    }
}
