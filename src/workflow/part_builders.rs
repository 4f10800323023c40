//! 小题构建 - 流程层
//!
//! 解析小题块、确定题型，再交给对应题型的构建器。
//! [`build_body`] 对 [`QuestionType`] 做穷尽匹配，新增题型时编译器会要求补上构建器。

use tracing::debug;

use crate::error::StructureError;
use crate::models::language::Language;
use crate::models::metadata::{keys, MetadataMap};
use crate::models::question::{
    AiTemplate, AnswerConstraint, Choice, ChoiceBody, ChoiceKind, Direction, FreeResponseBody,
    GapTextBody, GapTextKey, InputBoxAnswer, InputBoxBody, OrderingBody, Part, PartBody,
    StringBody,
};
use crate::models::question_type::QuestionType;
use crate::services::html_renderer::{TextRenderer, GAP_TOKEN};
use crate::workflow::part_parser::{non_blank_lines, parse_part_block, PartContent, Section};

/// 构建器的输入
pub struct BuildCtx<'a> {
    pub language: Language,
    pub content: &'a PartContent,
    pub part_metadata: &'a MetadataMap,
    pub question_metadata: &'a MetadataMap,
    pub renderer: &'a TextRenderer,
}

impl BuildCtx<'_> {
    fn render(&self, text: &str) -> String {
        self.renderer.render(text, self.language)
    }

    fn render_gap_stem(&self, text: &str) -> String {
        self.renderer.render_gap_stem(text, self.language)
    }

    /// 小题级优先，其次题目级；空值视为未设置
    fn ai_template(&self) -> Option<AiTemplate> {
        self.part_metadata
            .get_non_empty(keys::AI_TEMPLATE_ID)
            .or_else(|| self.question_metadata.get_non_empty(keys::AI_TEMPLATE_ID))
            .map(|id| AiTemplate {
                ai_template_id: id.to_string(),
            })
    }
}

/// 构建器输出
pub struct BuiltBody {
    pub body: PartBody,
    /// 替换通用题干（选词填空）
    pub stem: Option<String>,
}

impl From<PartBody> for BuiltBody {
    fn from(body: PartBody) -> Self {
        Self { body, stem: None }
    }
}

/// 构建一个小题
///
/// # 参数
/// - `block`: 小题块原文
/// - `n`: 小题序号（从1开始）
/// - `question_metadata`: 题目级元数据
/// - `language`: 题目语言
/// - `renderer`: 文本渲染器
pub fn build_part(
    block: &str,
    n: usize,
    question_metadata: &MetadataMap,
    language: Language,
    renderer: &TextRenderer,
) -> Result<Part, StructureError> {
    let parsed = parse_part_block(block);
    let kind = resolve_type(&parsed.metadata, question_metadata)?;
    debug!("第 {} 小题题型: {}", n, kind);

    let ctx = BuildCtx {
        language,
        content: &parsed.content,
        part_metadata: &parsed.metadata,
        question_metadata,
        renderer,
    };

    let stem = parsed.content.section(Section::Stem).map(|stem| ctx.render(stem));
    let built = build_body(kind, &ctx)?;

    Ok(Part {
        n,
        kind,
        subtype: None,
        standalone: false,
        stem: built.stem.or(stem),
        body: built.body,
    })
}

/// 小题级 `type` 优先于题目级
pub fn resolve_type(
    part_metadata: &MetadataMap,
    question_metadata: &MetadataMap,
) -> Result<QuestionType, StructureError> {
    part_metadata
        .get_non_empty(keys::TYPE)
        .or_else(|| question_metadata.get_non_empty(keys::TYPE))
        .ok_or(StructureError::TypeNotSpecified)?
        .parse()
}

/// 按题型分派到构建器
pub fn build_body(kind: QuestionType, ctx: &BuildCtx<'_>) -> Result<BuiltBody, StructureError> {
    let built: BuiltBody = match kind {
        QuestionType::Mcq | QuestionType::Mrq => build_choice_part(kind, ctx)?.into(),
        QuestionType::String => build_string_part(ctx)?.into(),
        QuestionType::Ordering => build_ordering_part(ctx)?.into(),
        QuestionType::GapText => build_gap_text_part(ctx)?,
        QuestionType::Matching => build_matching_part(ctx)?.into(),
        QuestionType::InputBox => build_input_box_part(ctx)?.into(),
        QuestionType::Frq | QuestionType::FrqAi => build_free_response_part(kind, ctx)?.into(),
    };
    Ok(built)
}

/// 单选/多选：`*` 开头的行为正确选项
fn build_choice_part(kind: QuestionType, ctx: &BuildCtx<'_>) -> Result<PartBody, StructureError> {
    let lines = ctx.content.require(Section::Choices, kind)?;

    let choices = non_blank_lines(lines)
        .enumerate()
        .map(|(j, line)| match line.strip_prefix('*') {
            Some(text) => Choice::new(ChoiceKind::Key, ctx.render(text.trim()), j),
            None => Choice::new(ChoiceKind::Distractor, ctx.render(line), j),
        })
        .collect();

    Ok(PartBody::Choices(ChoiceBody { choices }))
}

fn build_string_part(ctx: &BuildCtx<'_>) -> Result<PartBody, StructureError> {
    let answer = ctx.content.require(Section::Answer, QuestionType::String)?;

    Ok(PartBody::String(StringBody {
        choices: None,
        answer: vec![ctx.render(answer)],
        ai: ctx.ai_template(),
    }))
}

/// 排序题：出现顺序即正确顺序
fn build_ordering_part(ctx: &BuildCtx<'_>) -> Result<PartBody, StructureError> {
    let lines = ctx.content.require(Section::Choices, QuestionType::Ordering)?;

    let choices = non_blank_lines(lines)
        .enumerate()
        .map(|(j, line)| {
            Choice::new(ChoiceKind::Distractor, ctx.render(line), j).with_correct_order(j + 1)
        })
        .collect();

    Ok(PartBody::Ordering(OrderingBody {
        direction: Direction::Vertical,
        choices,
    }))
}

/// 选词填空：`[GAPS]` 的行按顺序对应题干中的 `[BLANK]`，数量不做校验
fn build_gap_text_part(ctx: &BuildCtx<'_>) -> Result<BuiltBody, StructureError> {
    let gaps = ctx.content.require(Section::Gaps, QuestionType::GapText)?;
    let stem = ctx.content.require(Section::Stem, QuestionType::GapText)?;

    let gap_text_keys: Vec<GapTextKey> = non_blank_lines(gaps)
        .enumerate()
        .map(|(j, line)| GapTextKey {
            value: line.to_string(),
            correct_order: j + 1,
        })
        .collect();

    let blanks = stem.matches(GAP_TOKEN).count();
    if blanks != gap_text_keys.len() {
        debug!(
            "空位数量 ({}) 与答案数量 ({}) 不一致",
            blanks,
            gap_text_keys.len()
        );
    }

    Ok(BuiltBody {
        body: PartBody::GapText(GapTextBody {
            choices: Vec::new(),
            gap_text_keys,
        }),
        stem: Some(ctx.render_gap_stem(stem)),
    })
}

/// 连线题：`左 | 右`，左侧为第 1 组，右侧为第 2 组，`correct_order` 相同者配对
fn build_matching_part(ctx: &BuildCtx<'_>) -> Result<PartBody, StructureError> {
    let lines = ctx
        .content
        .require(Section::MatchingPairs, QuestionType::Matching)?;

    let pairs = non_blank_lines(lines)
        .map(|line| {
            line.split_once('|')
                .map(|(left, right)| (left.trim(), right.trim()))
                .ok_or_else(|| StructureError::MalformedMatchingPair {
                    line: line.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let count = pairs.len();
    let group_one = pairs.iter().enumerate().map(|(j, (left, _))| {
        Choice::new(ChoiceKind::Distractor, ctx.render(left), j)
            .with_group(1)
            .with_correct_order(j + 1)
    });
    let group_two = pairs.iter().enumerate().map(|(j, (_, right))| {
        Choice::new(ChoiceKind::Distractor, ctx.render(right), j + count)
            .with_group(2)
            .with_correct_order(j + 1)
    });
    let choices = group_one.chain(group_two).collect();

    Ok(PartBody::Choices(ChoiceBody { choices }))
}

/// 数值输入：`值` 或 `值 | 单位`
fn build_input_box_part(ctx: &BuildCtx<'_>) -> Result<PartBody, StructureError> {
    let answer = ctx.content.require(Section::Answer, QuestionType::InputBox)?;

    let mut fields = answer.split('|');
    let value = fields.next().unwrap_or_default().trim().to_string();
    let unit = fields.next().map(|unit| unit.trim().to_string());

    Ok(PartBody::InputBox(InputBoxBody {
        choices: Vec::new(),
        answer: InputBoxAnswer {
            value,
            unit,
            // TODO: 按答案实际形态（如 78.5）推导约束类型
            constrains: AnswerConstraint::integer(),
        },
    }))
}

/// 主观题；frq_ai 必须有 ai_template_id
fn build_free_response_part(
    kind: QuestionType,
    ctx: &BuildCtx<'_>,
) -> Result<PartBody, StructureError> {
    let answer = ctx.content.require(Section::Answer, kind)?;

    let ai = match kind {
        QuestionType::FrqAi => Some(ctx.ai_template().ok_or(StructureError::MissingAiTemplate)?),
        _ => None,
    };

    Ok(PartBody::FreeResponse(FreeResponseBody {
        choices: Vec::new(),
        answer: ctx.render(answer),
        ai,
    }))
}
