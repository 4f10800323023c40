use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::stats::ProcessingStats;

/// 初始化 tracing 订阅者
///
/// `RUST_LOG` 优先；否则默认 `info`，详细模式为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目转换日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一个文档的统计
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `document`: 文档名称
/// - `stats`: 该文档的统计
pub fn append_document_summary(
    log_file_path: &str,
    document: &str,
    stats: &ProcessingStats,
) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {} | 总数 {} | 成功 {} | 失败 {} | 成功率 {:.1}%",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        document,
        stats.total_questions,
        stats.successful,
        stats.failed,
        stats.success_rate()
    )?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `max_concurrent`: 最大并发数
pub fn log_startup(max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 标记文档转 JSON");
    info!("📊 最大并发文档数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录文档加载信息
///
/// # 参数
/// - `total`: 文档总数
pub fn log_documents_loaded(total: usize) {
    info!("✓ 找到 {} 个待处理的文档", total);
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 汇总统计
/// - `documents`: 文档数量
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(stats: &ProcessingStats, documents: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 文档: {}", documents);
    info!("✅ 成功: {}/{}", stats.successful, stats.total_questions);
    info!("❌ 失败: {}", stats.failed);
    info!("📈 成功率: {:.1}%", stats.success_rate());
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
