//! 题目处理上下文
//!
//! 封装"我正在处理文档中的第几题"这一信息

use std::fmt::Display;

use crate::models::language::Language;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 题目在文档中的序号（从1开始）
    pub ordinal: usize,

    /// 元数据中的原始 id
    pub raw_id: String,

    /// 题目语言
    pub language: Language,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(ordinal: usize, raw_id: String, language: Language) -> Self {
        Self {
            ordinal,
            raw_id,
            language,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[题目 #{} ID#{} 语言#{}]",
            self.ordinal, self.raw_id, self.language
        )
    }
}
