//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行）
//! - 加载标记文档（Vec<MarkupDocument>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息和失败报告
//!
//! ### `document_processor` - 单个文档处理器
//! - 切分文档中的所有题目块
//! - 逐题调用 QuestionFlow，隔离单题失败
//! - 通过 RecordSink 保存记录
//! - 输出单个文档的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<MarkupDocument>)
//!     ↓
//! document_processor (处理 Vec<QuestionBlock>)
//!     ↓
//! workflow::QuestionFlow (处理单个题目块)
//!     ↓
//! services (能力层：校验 / 渲染 / 写入)
//! ```

pub mod batch_processor;
pub mod document_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use document_processor::DocumentProcessor;
