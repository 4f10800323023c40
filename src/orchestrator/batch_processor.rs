//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的处理和输出管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化日志文件、输出启动信息
//! 2. **批量加载**：加载输入路径下所有待处理的标记文档
//! 3. **并发控制**：使用 Semaphore 限制同时处理的文档数量
//! 4. **结果落盘**：每个文档的记录写入各自的输出目录
//! 5. **全局统计**：汇总所有文档的处理结果，写失败报告
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个题目的细节
//! - **统计隔离**：每个文档使用独立的 `DocumentProcessor`
//! - **向下委托**：委托 document_processor 处理单个文档

use crate::config::Config;
use crate::models::loaders::{self, MarkupDocument};
use crate::models::stats::ProcessingStats;
use crate::orchestrator::document_processor::DocumentProcessor;
use crate::services::{FailureWriter, JsonFileWriter};
use crate::utils::logging;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    failure_writer: FailureWriter,
}

/// 单个文档的处理结果
#[derive(Debug)]
struct DocumentResult {
    name: String,
    stats: ProcessingStats,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(config.max_concurrent_documents);

        let failure_writer = FailureWriter::with_path(&config.failure_report_file);

        Ok(Self {
            config,
            failure_writer,
        })
    }

    /// 运行应用主逻辑，返回所有文档的汇总统计
    pub async fn run(&self) -> Result<ProcessingStats> {
        info!("\n📁 正在扫描待处理的文档...");
        let loaded = loaders::load_documents(&self.config.input_path).await?;

        if loaded.documents.is_empty() {
            warn!("⚠️ 没有找到待处理的标记文档，程序结束");
            return Ok(ProcessingStats::default());
        }

        let total_documents = loaded.documents.len();
        logging::log_documents_loaded(total_documents);

        let results = self
            .process_all_documents(loaded.documents, loaded.from_folder)
            .await?;

        let mut total = ProcessingStats::default();
        for result in &results {
            self.failure_writer
                .write(&result.name, &result.stats.failures)?;
            logging::append_document_summary(
                &self.config.output_log_file,
                &result.name,
                &result.stats,
            )?;
            total.absorb(&result.stats);
        }

        // 输出最终统计
        logging::print_final_stats(&total, total_documents, &self.config.output_log_file);

        Ok(total)
    }

    /// 并发处理所有文档，结果按文档顺序返回
    async fn process_all_documents(
        &self,
        documents: Vec<MarkupDocument>,
        from_folder: bool,
    ) -> Result<Vec<DocumentResult>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_documents.max(1)));
        let mut handles = Vec::new();

        for (idx, document) in documents.into_iter().enumerate() {
            let document_index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let output_dir = self.output_dir_for(&document, from_folder);

            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                info!(
                    "[文档 {}] 开始处理: {}",
                    document_index,
                    document.path.display()
                );

                let mut writer = JsonFileWriter::new(output_dir);
                let stats = DocumentProcessor::new().process(&document.text, &mut writer);

                info!(
                    "[文档 {}] ✓ 完成: 成功 {}/{}",
                    document_index, stats.successful, stats.total_questions
                );
                DocumentResult {
                    name: document.name,
                    stats,
                }
            });
            handles.push((document_index, handle));
        }

        // 等待所有任务完成
        let mut results = Vec::with_capacity(handles.len());
        for (document_index, handle) in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("[文档 {}] 任务执行失败: {}", document_index, e);
                }
            }
        }

        Ok(results)
    }

    /// 文件夹输入时每个文档写入 `<output_dir>/<文档名>/`
    fn output_dir_for(&self, document: &MarkupDocument, from_folder: bool) -> PathBuf {
        if from_folder {
            self.config.output_dir.join(&document.name)
        } else {
            self.config.output_dir.clone()
        }
    }
}
