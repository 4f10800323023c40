//! 失败记录写入服务 - 业务能力层
//!
//! 只负责"写 failed.txt"能力，供作者事后修改标记

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::models::stats::FailedQuestion;

/// 失败记录写入服务
///
/// 职责：
/// - 将处理失败的题目追加写入报告文件
/// - 不关心失败原因的来源
pub struct FailureWriter {
    report_file_path: String,
}

impl FailureWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            report_file_path: path.into(),
        }
    }

    /// 追加一个文档的全部失败题目
    ///
    /// # 参数
    /// - `document`: 文档名称
    /// - `failures`: 失败题目列表
    pub fn write(&self, document: &str, failures: &[FailedQuestion]) -> Result<()> {
        if failures.is_empty() {
            return Ok(());
        }

        debug!("写入失败记录: 文档 {} | {} 道题", document, failures.len());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_file_path)?;

        for failure in failures {
            writeln!(
                file,
                "文档 {} | 题目 #{} | 原因: {}",
                document, failure.ordinal, failure.reason
            )?;
        }

        Ok(())
    }
}
