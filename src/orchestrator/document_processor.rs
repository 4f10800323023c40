//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理一个标记文档中的所有题目，是文档级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **切分题目**：按 `---` 行切分为题目块
//! 2. **流程调度**：逐题调用 `QuestionFlow`
//! 3. **失败隔离**：一道题失败只记入统计，不影响后续题目
//! 4. **结果落盘**：通过 `RecordSink` 保存成功的记录
//! 5. **统计输出**：记录成功/失败数量

use tracing::{error, info};

use crate::error::QuestionError;
use crate::models::stats::ProcessingStats;
use crate::services::record_writer::RecordSink;
use crate::workflow::markup::{split_document, QuestionBlock};
use crate::workflow::QuestionFlow;

/// 文档处理器
///
/// 统计只存在于单次 `process` 调用中，不跨调用或实例共享
#[derive(Debug, Default)]
pub struct DocumentProcessor {
    flow: QuestionFlow,
}

impl DocumentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 处理整个文档
    ///
    /// # 参数
    /// - `text`: 文档原文
    /// - `sink`: 记录输出端
    ///
    /// # 返回
    /// 本次运行的统计
    pub fn process(&self, text: &str, sink: &mut dyn RecordSink) -> ProcessingStats {
        info!("--- 开始批量处理 ---");

        let mut stats = ProcessingStats::default();

        let blocks: Vec<QuestionBlock> = split_document(text).collect();
        stats.total_questions = blocks.len();
        info!("找到 {} 个题目块", blocks.len());

        for (index, block) in blocks.iter().enumerate() {
            let ordinal = index + 1;
            match self.process_question(block, ordinal, sink) {
                Ok(file_name) => {
                    info!("[题目 #{}] ✅ 成功生成 {}", ordinal, file_name);
                    stats.record_success(file_name);
                }
                Err(e) => {
                    error!("[题目 #{}] ❌ 处理失败: {}", ordinal, error_chain(&e));
                    stats.record_failure(ordinal, e.to_string());
                }
            }
        }

        log_document_complete(&stats);
        stats
    }

    fn process_question(
        &self,
        block: &QuestionBlock,
        ordinal: usize,
        sink: &mut dyn RecordSink,
    ) -> Result<String, QuestionError> {
        let assembled = self.flow.assemble(block, ordinal)?;
        sink.persist(&assembled.file_name, &assembled.record)?;
        Ok(assembled.file_name)
    }
}

/// 拼接错误链，便于日志中看到底层原因
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let inner_text = inner.to_string();
        if !text.contains(&inner_text) {
            text.push_str(&format!(" <- {}", inner_text));
        }
        source = inner.source();
    }
    text
}

// ========== 日志辅助函数 ==========

fn log_document_complete(stats: &ProcessingStats) {
    info!("--- 批量处理完成 ---");
    info!("题目总数: {}", stats.total_questions);
    info!("成功: {}", stats.successful);
    info!("失败: {}", stats.failed);
    info!("成功率: {:.1}%", stats.success_rate());
}
