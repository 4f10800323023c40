//! 记录写入服务 - 业务能力层
//!
//! 只负责"把一道题的记录落盘"能力，不关心流程

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::PersistError;
use crate::models::question::QuestionRecord;

/// 题目记录的输出端
pub trait RecordSink {
    /// 保存一条记录
    ///
    /// # 参数
    /// - `file_name`: 输出文件名（`<id>.json`）
    /// - `record`: 题目记录
    fn persist(&mut self, file_name: &str, record: &QuestionRecord) -> Result<(), PersistError>;
}

/// 写 JSON 文件（UTF-8，两空格缩进，保留非 ASCII 字符）
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    output_dir: PathBuf,
}

impl JsonFileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl RecordSink for JsonFileWriter {
    fn persist(&mut self, file_name: &str, record: &QuestionRecord) -> Result<(), PersistError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| PersistError::CreateDirFailed {
            path: self.output_dir.clone(),
            source,
        })?;

        // 先序列化，失败时不留下残缺文件
        let json = serde_json::to_string_pretty(record)?;
        let path = self.output_dir.join(file_name);
        fs::write(&path, json).map_err(|source| PersistError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        debug!("写入记录: {}", path.display());
        Ok(())
    }
}

/// 内存输出端，保留 `(文件名, 记录)`
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub records: Vec<(String, QuestionRecord)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&QuestionRecord> {
        self.records
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, record)| record)
    }
}

impl RecordSink for MemorySink {
    fn persist(&mut self, file_name: &str, record: &QuestionRecord) -> Result<(), PersistError> {
        self.records.push((file_name.to_string(), record.clone()));
        Ok(())
    }
}
