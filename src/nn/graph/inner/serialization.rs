//! GraphInner 参数序列化（save_params/load_params）
//!
//! 文件格式：魔数 + 版本 + bincode 编码的参数表（按参数名匹配）

use super::super::error::GraphError;
use super::GraphInner;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct ParamRecord {
    name: String,
    value: Tensor,
}

impl GraphInner {
    /// 参数文件魔数
    const PARAMS_MAGIC: &'static [u8; 4] = b"FDGP";
    /// 参数文件版本
    const PARAMS_VERSION: u32 = 1;

    /// 保存所有参数到二进制文件
    pub fn save_params<P: AsRef<Path>>(&self, path: P) -> Result<(), GraphError> {
        let names: Vec<String> = self
            .get_trainable_nodes()
            .into_iter()
            .filter_map(|id| self.nodes.get(&id).map(|node| node.name().to_string()))
            .collect();
        self.save_named_params(path, &names)
    }

    /// 只保存指定名称的参数
    pub fn save_named_params<P: AsRef<Path>>(&self, path: P, names: &[String]) -> Result<(), GraphError> {
        let mut records = Vec::with_capacity(names.len());
        for name in names {
            let id = self
                .find_parameter_by_name(name)
                .ok_or_else(|| GraphError::InvalidOperation(format!("参数{name}不存在")))?;
            let value = self.get_node(id)?.value().ok_or_else(|| {
                GraphError::ComputationError(format!("参数{name}没有值"))
            })?;
            records.push(ParamRecord {
                name: name.clone(),
                value: value.clone(),
            });
        }

        let file = File::create(path.as_ref())
            .map_err(|e| GraphError::Io(format!("无法创建参数文件: {e}")))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(Self::PARAMS_MAGIC)
            .and_then(|()| writer.write_all(&Self::PARAMS_VERSION.to_le_bytes()))
            .map_err(|e| GraphError::Io(format!("写入文件头失败: {e}")))?;
        bincode::serialize_into(&mut writer, &records)
            .map_err(|e| GraphError::Serialization(format!("编码参数失败: {e}")))?;
        writer
            .flush()
            .map_err(|e| GraphError::Io(format!("刷新缓冲区失败: {e}")))?;
        Ok(())
    }

    /// 从二进制文件加载参数，返回加载的参数个数。
    /// 文件中的每个参数都必须在图中存在且形状一致。
    pub fn load_params<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, GraphError> {
        let file = File::open(path.as_ref())
            .map_err(|e| GraphError::Io(format!("无法打开参数文件: {e}")))?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader
            .read_exact(&mut magic)
            .map_err(|e| GraphError::Io(format!("读取魔数失败: {e}")))?;
        if &magic != Self::PARAMS_MAGIC {
            return Err(GraphError::Serialization(
                "无效的参数文件：请使用 save_params() 保存的文件".to_string(),
            ));
        }
        let mut version_bytes = [0u8; 4];
        reader
            .read_exact(&mut version_bytes)
            .map_err(|e| GraphError::Io(format!("读取版本失败: {e}")))?;
        let version = u32::from_le_bytes(version_bytes);
        if version != Self::PARAMS_VERSION {
            return Err(GraphError::Serialization(format!(
                "不支持的参数文件版本: {version}"
            )));
        }

        let records: Vec<ParamRecord> = bincode::deserialize_from(&mut reader)
            .map_err(|e| GraphError::Serialization(format!("解码参数失败: {e}")))?;
        for record in &records {
            let id = self.find_parameter_by_name(&record.name).ok_or_else(|| {
                GraphError::InvalidOperation(format!("图中没有名为{}的参数", record.name))
            })?;
            self.get_node_mut(id)?.set_value(&record.value)?;
        }
        Ok(records.len())
    }
}
