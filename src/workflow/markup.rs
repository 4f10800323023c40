//! 标记文本切分
//!
//! 文档 → 题目块 → 元数据 + 正文 → 题干说明 + 小题块

use crate::models::metadata::MetadataMap;

/// 题目分隔行
pub const QUESTION_SEPARATOR: &str = "---";
pub const STATEMENT_TAG: &str = "[STATEMENT]";
pub const PART_TAG: &str = "[PART]";

/// 一道题的原始标记文本（已去除首尾空白）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    pub text: String,
}

/// 按 `---` 行切分文档，按文档顺序产出非空题目块
///
/// 只能遍历一次
pub fn split_document(text: &str) -> QuestionBlocks<'_> {
    QuestionBlocks {
        lines: text.lines(),
    }
}

pub struct QuestionBlocks<'a> {
    lines: std::str::Lines<'a>,
}

impl Iterator for QuestionBlocks<'_> {
    type Item = QuestionBlock;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut block_lines = Vec::new();
            let mut exhausted = true;

            for line in self.lines.by_ref() {
                if line == QUESTION_SEPARATOR {
                    exhausted = false;
                    break;
                }
                block_lines.push(line);
            }

            let text = block_lines.join("\n").trim().to_string();
            if !text.is_empty() {
                return Some(QuestionBlock { text });
            }
            if exhausted {
                return None;
            }
        }
    }
}

/// 题目头部解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionHeader {
    pub metadata: MetadataMap,
    /// 从第一个 `[` 开头的行起的正文
    pub body: String,
}

/// 解析题目块开头的 `key: value` 行
///
/// 元数据在第一个以 `[` 开头的行处结束；没有任何标签行时正文为整个块
pub fn parse_header(block: &str) -> QuestionHeader {
    let lines: Vec<&str> = block.trim().split('\n').map(str::trim_end).collect();
    let mut metadata = MetadataMap::new();
    let mut body_start = 0;

    for (i, line) in lines.iter().enumerate() {
        if line.starts_with('[') {
            body_start = i;
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            metadata.insert(key.trim(), value.trim());
        }
    }

    QuestionHeader {
        metadata,
        body: lines[body_start..].join("\n"),
    }
}

/// 正文结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLayout {
    /// `[STATEMENT]` 段的原始文本（非空时）
    pub statement: Option<String>,
    /// 非空的小题块
    pub parts: Vec<String>,
}

/// 同时出现 `[STATEMENT]` 和 `[PART]` 时按小题切分，否则整个正文是一个隐式小题
pub fn split_body(body: &str) -> BodyLayout {
    if body.contains(STATEMENT_TAG) {
        if let Some((statement, rest)) = body.split_once(PART_TAG) {
            let statement = statement.replace(STATEMENT_TAG, "").trim().to_string();
            let parts = rest
                .split(PART_TAG)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect();
            return BodyLayout {
                statement: (!statement.is_empty()).then_some(statement),
                parts,
            };
        }
    }

    BodyLayout {
        statement: None,
        parts: if body.trim().is_empty() {
            Vec::new()
        } else {
            vec![body.to_string()]
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_document_drops_empty_blocks() {
        let doc = "id: 1\n---\n\n---\nid: 2\n  \n---\n";
        let blocks: Vec<String> = split_document(doc).map(|b| b.text).collect();
        assert_eq!(blocks, vec!["id: 1", "id: 2"]);
    }

    #[test]
    fn test_separator_must_be_whole_line() {
        let doc = "a: b\n----\nc: d\n--- \ne: f";
        assert_eq!(split_document(doc).count(), 1);
        assert_eq!(split_document("").count(), 0);
        assert_eq!(split_document("---\n---").count(), 0);
    }

    #[test]
    fn test_parse_header() {
        let header = parse_header("id: 1001\nlanguage: en\ntype: mcq\n\n[STEM]\nWhat?\n");
        assert_eq!(header.metadata.get("id"), Some("1001"));
        assert_eq!(header.metadata.get("type"), Some("mcq"));
        assert_eq!(header.body, "[STEM]\nWhat?");
    }

    #[test]
    fn test_header_value_keeps_later_colons() {
        let header = parse_header("description: ratio 1:2\n[STEM]\nx");
        assert_eq!(header.metadata.get("description"), Some("ratio 1:2"));
    }

    #[test]
    fn test_split_body_with_statement_and_parts() {
        let layout = split_body("[STATEMENT]\nRead this.\n[PART]\ntype: mcq\n[PART]\n\n[PART]\ntype: frq");
        assert_eq!(layout.statement.as_deref(), Some("Read this."));
        assert_eq!(layout.parts, vec!["type: mcq", "type: frq"]);
    }

    #[test]
    fn test_split_body_without_statement_is_single_part() {
        let body = "[STEM]\nq\n[PART]\nx";
        let layout = split_body(body);
        assert_eq!(layout.statement, None);
        assert_eq!(layout.parts, vec![body.to_string()]);

        assert!(split_body("  \n").parts.is_empty());
    }

    #[test]
    fn test_empty_statement_is_none() {
        let layout = split_body("[STATEMENT]\n\n[PART]\n[STEM]\nq");
        assert_eq!(layout.statement, None);
        assert_eq!(layout.parts.len(), 1);
    }
}
