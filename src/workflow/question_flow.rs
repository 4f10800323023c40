//! 题目组装流程 - 流程层
//!
//! 核心职责：定义"一道题"从标记文本到输出记录的完整流程
//!
//! 流程顺序：
//! 1. 解析头部元数据 → 校验
//! 2. 切分题干说明与小题
//! 3. 逐个构建小题（任何一个失败则整题失败）
//! 4. 组装记录，回填 `parts_count`

use tracing::{debug, error, info};

use crate::error::{QuestionResult, StructureError};
use crate::models::metadata::{keys, MetadataMap};
use crate::models::question::{QuestionRecord, RecordMetadata, SourceId};
use crate::services::html_renderer::TextRenderer;
use crate::services::metadata_validator::{validate_metadata, ValidatedMetadata};
use crate::workflow::markup::{parse_header, split_body, QuestionBlock};
use crate::workflow::part_builders::build_part;
use crate::workflow::question_ctx::QuestionCtx;

/// 发布时间格式
const PUBLICATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 组装完成的题目
#[derive(Debug, Clone)]
pub struct AssembledQuestion {
    pub ctx: QuestionCtx,
    /// 输出文件名 `<id>.json`
    pub file_name: String,
    pub record: QuestionRecord,
}

/// 题目组装流程
///
/// - 只处理单个题目块
/// - 不持有跨题状态
/// - 不负责落盘
#[derive(Debug, Clone, Default)]
pub struct QuestionFlow {
    renderer: TextRenderer,
}

impl QuestionFlow {
    /// 创建新的题目组装流程
    pub fn new() -> Self {
        Self::default()
    }

    /// 组装一道题
    ///
    /// # 参数
    /// - `block`: 题目块
    /// - `ordinal`: 题目在文档中的序号（从1开始，仅用于日志）
    pub fn assemble(&self, block: &QuestionBlock, ordinal: usize) -> QuestionResult<AssembledQuestion> {
        info!("[题目 #{}] 开始处理...", ordinal);

        let header = parse_header(&block.text);
        debug!(
            "[题目 #{}] 元数据字段: {:?}",
            ordinal,
            header.metadata.iter().map(|(key, _)| key).collect::<Vec<_>>()
        );
        let validated = validate_metadata(&header.metadata)?;
        let ctx = QuestionCtx::new(ordinal, validated.raw_id.clone(), validated.language);

        let layout = split_body(&header.body);
        let statement = layout
            .statement
            .as_deref()
            .map(|text| self.renderer.render(text, ctx.language));

        let mut parts = Vec::with_capacity(layout.parts.len());
        for (i, part_block) in layout.parts.iter().enumerate() {
            let n = i + 1;
            let part = build_part(part_block, n, &header.metadata, ctx.language, &self.renderer)
                .map_err(|e| {
                    error!("{} 第 {} 小题处理失败: {}", ctx, n, e);
                    e.in_part(n)
                })?;
            parts.push(part);
        }

        if parts.is_empty() {
            return Err(StructureError::NoValidParts.into());
        }

        let metadata = build_metadata(&header.metadata, &validated, parts.len());
        let record = QuestionRecord {
            parts,
            statement,
            instance_number: 1,
            metadata,
        };

        Ok(AssembledQuestion {
            file_name: QuestionRecord::file_name(&ctx.raw_id),
            ctx,
            record,
        })
    }
}

/// 组装记录元数据；阿拉伯语题目带 `mapped_id` 时交换两个编号
fn build_metadata(
    metadata: &MetadataMap,
    validated: &ValidatedMetadata,
    parts_count: usize,
) -> RecordMetadata {
    let (id, mapped_id) = match validated.mapped_id {
        Some(mapped) => (mapped, validated.id),
        None => (validated.id, validated.id),
    };

    RecordMetadata {
        id,
        mapped_id,
        category: metadata.get(keys::CATEGORY).unwrap_or("exam").to_string(),
        language: validated.language,
        country: metadata.get(keys::COUNTRY).unwrap_or("eg").to_string(),
        dialect: validated.language.dialects(),
        source_id: SourceId::default(),
        description: metadata.get(keys::DESCRIPTION).unwrap_or_default().to_string(),
        example_id: None,
        has_example: false,
        instances_count: 1,
        publication_date: chrono::Local::now()
            .format(PUBLICATION_DATE_FORMAT)
            .to_string(),
        parts_count,
    }
}
