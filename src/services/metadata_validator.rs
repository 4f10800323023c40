//! 元数据校验 - 业务能力层

use crate::error::{MetadataError, MetadataProblem};
use crate::models::language::Language;
use crate::models::metadata::{keys, MetadataMap};

/// 通过校验的题目级元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMetadata {
    /// 原始 id 文本，用作输出文件名
    pub raw_id: String,
    pub id: i64,
    pub language: Language,
    /// 阿拉伯语题目的映射 id
    pub mapped_id: Option<i64>,
}

/// 校验必填字段与类型，收集全部问题后一次返回
pub fn validate_metadata(metadata: &MetadataMap) -> Result<ValidatedMetadata, MetadataError> {
    let mut problems = Vec::new();

    for field in [keys::ID, keys::LANGUAGE] {
        if metadata.get_non_empty(field).is_none() {
            problems.push(MetadataProblem::Missing(field));
        }
    }

    let language = metadata.get(keys::LANGUAGE).and_then(|code| {
        let language = Language::from_code(code);
        if language.is_none() {
            problems.push(MetadataProblem::InvalidLanguage(code.to_string()));
        }
        language
    });

    let id = metadata.get(keys::ID).and_then(|raw| match raw.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            problems.push(MetadataProblem::NonNumericId(raw.to_string()));
            None
        }
    });

    // 只有阿拉伯语题目使用 mapped_id
    let mapped_id = match (language, metadata.get(keys::MAPPED_ID)) {
        (Some(Language::Arabic), Some(raw)) => match raw.parse::<i64>() {
            Ok(mapped) => Some(mapped),
            Err(_) => {
                problems.push(MetadataProblem::NonNumericMappedId(raw.to_string()));
                None
            }
        },
        _ => None,
    };

    match (id, language) {
        (Some(id), Some(language)) if problems.is_empty() => Ok(ValidatedMetadata {
            raw_id: metadata.get(keys::ID).unwrap_or_default().to_string(),
            id,
            language,
            mapped_id,
        }),
        _ => Err(MetadataError { problems }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> MetadataMap {
        let mut map = MetadataMap::new();
        for (k, v) in pairs {
            map.insert(*k, *v);
        }
        map
    }

    #[test]
    fn test_valid_metadata() {
        let validated = validate_metadata(&map(&[("id", "1001"), ("language", "en")])).unwrap();
        assert_eq!(validated.id, 1001);
        assert_eq!(validated.raw_id, "1001");
        assert_eq!(validated.language, Language::English);
        assert_eq!(validated.mapped_id, None);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = validate_metadata(&map(&[("type", "mcq")])).unwrap_err();
        assert_eq!(
            err.problems,
            vec![
                MetadataProblem::Missing("id"),
                MetadataProblem::Missing("language")
            ]
        );
    }

    #[test]
    fn test_invalid_language_and_id() {
        let err = validate_metadata(&map(&[("id", "abc"), ("language", "fr")])).unwrap_err();
        assert_eq!(
            err.problems,
            vec![
                MetadataProblem::InvalidLanguage("fr".into()),
                MetadataProblem::NonNumericId("abc".into())
            ]
        );
    }

    #[test]
    fn test_empty_id_is_missing_and_non_numeric() {
        let err = validate_metadata(&map(&[("id", ""), ("language", "en")])).unwrap_err();
        assert_eq!(
            err.problems,
            vec![
                MetadataProblem::Missing("id"),
                MetadataProblem::NonNumericId(String::new())
            ]
        );
    }

    #[test]
    fn test_mapped_id_only_checked_for_arabic() {
        let english = map(&[("id", "1"), ("language", "en"), ("mapped_id", "x")]);
        assert_eq!(validate_metadata(&english).unwrap().mapped_id, None);

        let arabic = map(&[("id", "1"), ("language", "ar"), ("mapped_id", "77")]);
        assert_eq!(validate_metadata(&arabic).unwrap().mapped_id, Some(77));

        let broken = map(&[("id", "1"), ("language", "ar"), ("mapped_id", "x")]);
        assert_eq!(
            validate_metadata(&broken).unwrap_err().problems,
            vec![MetadataProblem::NonNumericMappedId("x".into())]
        );
    }
}
