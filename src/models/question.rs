//! 输出记录结构
//!
//! 每道题生成一个 [`QuestionRecord`]，序列化后即为下游测评平台消费的 JSON 文档。
//! 字段顺序即 JSON 中的键顺序。

use serde::Serialize;

use crate::models::language::Language;
use crate::models::question_type::QuestionType;

/// 来源编号（固定值）
pub const SOURCE_ID_VALUE: u64 = 182136230818;

/// 题目记录
#[derive(Debug, Clone, Serialize)]
pub struct QuestionRecord {
    pub parts: Vec<Part>,
    pub statement: Option<String>,
    pub instance_number: u32,
    pub metadata: RecordMetadata,
}

impl QuestionRecord {
    /// 输出文件名，使用元数据中原始的 `id` 值
    pub fn file_name(raw_id: &str) -> String {
        format!("{}.json", raw_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordMetadata {
    pub id: i64,
    pub mapped_id: i64,
    pub category: String,
    pub language: Language,
    pub country: String,
    pub dialect: Vec<String>,
    pub source_id: SourceId,
    pub description: String,
    pub example_id: Option<i64>,
    pub has_example: bool,
    pub instances_count: u32,
    pub publication_date: String,
    pub parts_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceId {
    pub value: u64,
    pub page_number: Option<u32>,
}

impl Default for SourceId {
    fn default() -> Self {
        Self {
            value: SOURCE_ID_VALUE,
            page_number: None,
        }
    }
}

/// 小题
///
/// `n` 为小题在题目中的序号（从1开始），题型相关字段由 `body` 平铺输出
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub n: usize,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub subtype: Option<String>,
    pub standalone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem: Option<String>,
    #[serde(flatten)]
    pub body: PartBody,
}

/// 各题型特有的字段
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PartBody {
    /// mcq / mrq / matching
    Choices(ChoiceBody),
    Ordering(OrderingBody),
    String(StringBody),
    GapText(GapTextBody),
    InputBox(InputBoxBody),
    /// frq / frq_ai
    FreeResponse(FreeResponseBody),
}

impl PartBody {
    /// 选项列表；string 题型为 `None`
    pub fn choices(&self) -> Option<&[Choice]> {
        match self {
            PartBody::Choices(body) => Some(&body.choices),
            PartBody::Ordering(body) => Some(&body.choices),
            PartBody::String(body) => body.choices.as_deref(),
            PartBody::GapText(body) => Some(&body.choices),
            PartBody::InputBox(body) => Some(&body.choices),
            PartBody::FreeResponse(body) => Some(&body.choices),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceBody {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderingBody {
    pub direction: Direction,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Vertical,
}

#[derive(Debug, Clone, Serialize)]
pub struct StringBody {
    /// 恒为 null
    pub choices: Option<Vec<Choice>>,
    pub answer: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiTemplate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapTextBody {
    /// 恒为空列表
    pub choices: Vec<Choice>,
    pub gap_text_keys: Vec<GapTextKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapTextKey {
    pub value: String,
    pub correct_order: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputBoxBody {
    pub choices: Vec<Choice>,
    pub answer: InputBoxAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputBoxAnswer {
    pub value: String,
    pub unit: Option<String>,
    pub constrains: AnswerConstraint,
}

/// 数值输入的约束，目前固定为整数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerConstraint {
    #[serde(rename = "type")]
    pub kind: String,
}

impl AnswerConstraint {
    pub fn integer() -> Self {
        Self {
            kind: "integer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FreeResponseBody {
    pub choices: Vec<Choice>,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiTemplate {
    pub ai_template_id: String,
}

/// 选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    #[serde(rename = "type")]
    pub kind: ChoiceKind,
    pub html_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_order: Option<usize>,
    pub values: Vec<String>,
    pub unit: Option<String>,
    pub index: usize,
    pub fixed_order: usize,
    pub last_order: bool,
}

impl Choice {
    /// 按 0 基索引创建选项，`fixed_order = index + 1`
    pub fn new(kind: ChoiceKind, html_content: String, index: usize) -> Self {
        Self {
            kind,
            html_content,
            group: None,
            correct_order: None,
            values: Vec::new(),
            unit: None,
            index,
            fixed_order: index + 1,
            last_order: false,
        }
    }

    pub fn with_group(mut self, group: u8) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_correct_order(mut self, correct_order: usize) -> Self {
        self.correct_order = Some(correct_order);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKind {
    /// 正确选项
    Key,
    /// 干扰项
    Distractor,
}
