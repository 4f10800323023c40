use serde::Serialize;
use std::str::FromStr;

use crate::error::StructureError;

/// 题型枚举
///
/// 每个题型对应一个结构构建器，见 `workflow::part_builders`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuestionType {
    /// 单选题
    #[serde(rename = "mcq")]
    Mcq,
    /// 多选题
    #[serde(rename = "mrq")]
    Mrq,
    /// 文本填空
    #[serde(rename = "string")]
    String,
    /// 排序题
    #[serde(rename = "oq")]
    Ordering,
    /// 选词填空
    #[serde(rename = "gapText")]
    GapText,
    /// 连线题
    #[serde(rename = "matching")]
    Matching,
    /// 数值输入
    #[serde(rename = "input_box")]
    InputBox,
    /// 主观题
    #[serde(rename = "frq")]
    Frq,
    /// AI 批改的主观题
    #[serde(rename = "frq_ai")]
    FrqAi,
}

impl QuestionType {
    pub const ALL: [QuestionType; 9] = [
        QuestionType::Mcq,
        QuestionType::Mrq,
        QuestionType::String,
        QuestionType::Ordering,
        QuestionType::GapText,
        QuestionType::Matching,
        QuestionType::InputBox,
        QuestionType::Frq,
        QuestionType::FrqAi,
    ];

    /// 标记语言中的题型名称
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::Mrq => "mrq",
            QuestionType::String => "string",
            QuestionType::Ordering => "oq",
            QuestionType::GapText => "gapText",
            QuestionType::Matching => "matching",
            QuestionType::InputBox => "input_box",
            QuestionType::Frq => "frq",
            QuestionType::FrqAi => "frq_ai",
        }
    }
}

impl FromStr for QuestionType {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| StructureError::UnsupportedType(s.to_string()))
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
