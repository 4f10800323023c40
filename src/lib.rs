//! # Question JSON
//!
//! 把标记格式的考试题目转换为 JSON 记录的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 语言、题型、元数据、输出记录和统计
//! - `loaders/` - 从文件或文件夹加载标记文档
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心整体流程
//! - `GlyphSubstitution` - 阿拉伯语数学字母替换
//! - `MathFieldRenderer` / `TextRenderer` - 文本与公式渲染为 HTML
//! - `validate_metadata` - 题目元数据校验
//! - `RecordSink` - 记录持久化
//! - `FailureWriter` - 写 failed.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `QuestionCtx` - 上下文封装（序号 + ID + 语言）
//! - `QuestionFlow` - 流程编排（解析 → 校验 → 构建分题 → 组装记录）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文档处理器，管理并发和统计
//! - `orchestrator/document_processor` - 单个文档处理器，遍历题目块
//!
//! ## 模块结构

pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{QuestionError, QuestionResult};
pub use models::{Language, ProcessingStats, QuestionRecord, QuestionType};
pub use orchestrator::{App, DocumentProcessor};
pub use services::{JsonFileWriter, MemorySink, RecordSink};
pub use workflow::{AssembledQuestion, QuestionCtx, QuestionFlow};
