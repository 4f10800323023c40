//! 小题块解析
//!
//! 标签行 `[UPPER_NAME]` 打开一个段落，之后的非空行都归入该段落；
//! 第一个标签之前的 `key: value` 行是小题级元数据。

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::StructureError;
use crate::models::metadata::MetadataMap;
use crate::models::question_type::QuestionType;

static TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([A-Z_]+)\]$").expect("标签正则无效"));
static META_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z_]+):\s*(.*)").expect("元数据正则无效"));

/// 构建器用到的段落
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Stem,
    Choices,
    Answer,
    Gaps,
    MatchingPairs,
}

impl Section {
    /// 段落在内容表中的键（标签名小写）
    pub fn key(self) -> &'static str {
        match self {
            Section::Stem => "stem",
            Section::Choices => "choices",
            Section::Answer => "answer",
            Section::Gaps => "gaps",
            Section::MatchingPairs => "matching_pairs",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key().to_uppercase())
    }
}

/// 小题各段落的文本，键来自标签名
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartContent {
    sections: HashMap<String, String>,
}

impl PartContent {
    pub fn section(&self, section: Section) -> Option<&str> {
        self.sections.get(section.key()).map(String::as_str)
    }

    /// 获取题型必需的段落
    pub fn require(
        &self,
        section: Section,
        question_type: QuestionType,
    ) -> Result<&str, StructureError> {
        self.section(section)
            .ok_or(StructureError::MissingSection {
                question_type,
                section,
            })
    }
}

/// 解析后的小题块
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPart {
    pub metadata: MetadataMap,
    pub content: PartContent,
}

pub fn parse_part_block(block: &str) -> ParsedPart {
    let mut parsed = ParsedPart::default();
    let mut current_tag: Option<String> = None;

    for line in block.trim().split('\n') {
        if let Some(caps) = TAG_LINE.captures(line) {
            let tag = caps[1].to_lowercase();
            parsed.content.sections.insert(tag.clone(), String::new());
            current_tag = Some(tag);
            continue;
        }

        match &current_tag {
            None => {
                if let Some(caps) = META_LINE.captures(line) {
                    parsed.metadata.insert(&caps[1], &caps[2]);
                }
            }
            Some(tag) if !line.trim().is_empty() => {
                if let Some(text) = parsed.content.sections.get_mut(tag) {
                    text.push_str(line);
                    text.push('\n');
                }
            }
            Some(_) => {}
        }
    }

    for text in parsed.content.sections.values_mut() {
        *text = text.trim().to_string();
    }

    parsed
}

/// 非空行，去除首尾空白
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}
