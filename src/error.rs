//! 错误类型
//!
//! 结构/校验错误在单题边界处被捕获并记为失败；渲染降级使用独立的
//! [`RenderError`]，只在渲染器内部流转，永不向外传播。

use std::path::PathBuf;

use thiserror::Error;

use crate::models::question_type::QuestionType;
use crate::workflow::part_parser::Section;

/// 单题处理错误
#[derive(Debug, Error)]
pub enum QuestionError {
    /// 元数据校验失败
    #[error("元数据校验失败: {0}")]
    Metadata(#[from] MetadataError),
    /// 结构错误
    #[error("结构错误: {0}")]
    Structure(#[from] StructureError),
    /// 输出写入失败
    #[error("写入失败: {0}")]
    Persist(#[from] PersistError),
}

/// 元数据校验错误，列出所有问题字段
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{}", format_problems(.problems))]
pub struct MetadataError {
    pub problems: Vec<MetadataProblem>,
}

fn format_problems(problems: &[MetadataProblem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetadataProblem {
    /// 缺少必填字段
    #[error("缺少必填字段: {0}")]
    Missing(&'static str),
    /// 不支持的语言
    #[error("无效的语言: {0}")]
    InvalidLanguage(String),
    /// id 不是整数
    #[error("id 必须是整数: {0}")]
    NonNumericId(String),
    /// mapped_id 不是整数
    #[error("mapped_id 必须是整数: {0}")]
    NonNumericMappedId(String),
}

/// 结构错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    /// 题目和小题都没有指定题型
    #[error("未指定题型 (type)")]
    TypeNotSpecified,
    /// 不支持的题型
    #[error("不支持的题型: {0}")]
    UnsupportedType(String),
    /// 题型缺少必需的段落
    #[error("{question_type} 题型缺少 [{section}] 段落")]
    MissingSection {
        question_type: QuestionType,
        section: Section,
    },
    /// 连线行缺少分隔符
    #[error("连线行必须包含 '|' 分隔符: {line}")]
    MalformedMatchingPair { line: String },
    /// frq_ai 缺少模板
    #[error("frq_ai 题型必须提供 ai_template_id")]
    MissingAiTemplate,
    /// 没有任何有效小题
    #[error("题目中没有有效的小题")]
    NoValidParts,
    /// 某个小题构建失败
    #[error("第 {n} 小题: {source}")]
    Part {
        n: usize,
        #[source]
        source: Box<StructureError>,
    },
}

impl StructureError {
    pub fn in_part(self, n: usize) -> Self {
        StructureError::Part {
            n,
            source: Box::new(self),
        }
    }
}

/// 输出写入错误
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("无法创建目录 {}: {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON 序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("写入文件失败 {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 渲染内部错误，由渲染器转换为降级输出
#[derive(Debug, Error)]
pub(crate) enum RenderError {
    #[error("格式化失败")]
    Format(#[from] std::fmt::Error),
    #[error("公式中包含保留字符 {0:?}")]
    ReservedCharacter(char),
    #[error("LaTeX 命令占位符 #{0} 丢失")]
    PlaceholderLost(usize),
}

/// 单题处理结果类型
pub type QuestionResult<T> = Result<T, QuestionError>;
