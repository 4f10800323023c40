//! 行内文本渲染 - 业务能力层
//!
//! 把自由文本渲染为 HTML 段落：
//! 1. 按 ``` ``公式`` ```（强制英文）和 `` `公式` ``（随语言）切分
//! 2. 公式段交给 [`MathFieldRenderer`]
//! 3. 普通文本先转义，再把 `_____`（选词填空题干中还有 `[BLANK]`）换成标记，包进 `pre-wrap` span
//! 4. 整体包进 `<p>`，阿拉伯语加 `dir="rtl"`
//!
//! 标记只在转义之后插入，作者手写的同样 HTML 会被正常转义。

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::RenderError;
use crate::models::language::Language;
use crate::services::math_field::MathFieldRenderer;
use crate::utils::logging::truncate_text;

/// 作者书写的空白线
pub const BLANK_TOKEN: &str = "_____";
/// 选词填空题干中的空位
pub const GAP_TOKEN: &str = "[BLANK]";

pub const BLANK_MARKER: &str =
    r#"<span data-node-type="blank-line" data-node-variation="space">&nbsp;</span>"#;
pub const GAP_MARKER: &str =
    r#"<span data-node-type="blank-line" data-node-variation="gap">&nbsp;</span>"#;

/// 双反引号在前，保证 ``` ``x`` ``` 不会被拆成两个空的单反引号段
static MATH_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``([^`]*)``|`([^`]*)`").expect("公式正则无效"));

/// 文本片段
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Plain(&'a str),
    /// 随题目语言渲染的公式
    Math(&'a str),
    /// 强制英文的公式
    MathEnglish(&'a str),
}

/// 行内文本渲染器
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    math: MathFieldRenderer,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 渲染文本为 HTML 段落，出错时返回截断的错误段落
    pub fn render(&self, text: &str, language: Language) -> String {
        self.render_with(text, language, false)
    }

    /// 渲染选词填空题干，`[BLANK]` 变为空位标记
    pub fn render_gap_stem(&self, text: &str, language: Language) -> String {
        self.render_with(text, language, true)
    }

    fn render_with(&self, text: &str, language: Language, gaps: bool) -> String {
        if text.is_empty() {
            return String::new();
        }

        self.try_render(text, language, gaps).unwrap_or_else(|e| {
            warn!("文本渲染失败: {}", e);
            format!(
                r#"<p class="error">Text processing error: {}</p>"#,
                escape_text(&truncate_text(text, 50))
            )
        })
    }

    fn try_render(
        &self,
        text: &str,
        language: Language,
        gaps: bool,
    ) -> Result<String, RenderError> {
        let direction = if language.is_rtl() { r#" dir="rtl""# } else { "" };

        let mut content = String::new();
        for segment in split_segments(text) {
            match segment {
                Segment::MathEnglish(equation) => {
                    let equation = equation.trim();
                    if !equation.is_empty() {
                        content.push_str(&self.math.render(equation, language, true));
                    }
                }
                Segment::Math(equation) => {
                    let equation = equation.trim();
                    if !equation.is_empty() {
                        content.push_str(&self.math.render(equation, language, false));
                    }
                }
                Segment::Plain(plain) => {
                    write!(
                        content,
                        r#"<span style="white-space: pre-wrap;">{}</span>"#,
                        escape_plain(plain, gaps)
                    )?;
                }
            }
        }

        let mut html = String::new();
        write!(
            html,
            r#"<p class="LexicalTheme__paragraph"{}>{}</p>"#,
            direction, content
        )?;
        Ok(html)
    }
}

/// 按公式分隔符切分，空片段被丢弃
fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in MATH_SPAN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Plain(&text[last..whole.start()]));
        }
        match (caps.get(1), caps.get(2)) {
            (Some(english), _) => segments.push(Segment::MathEnglish(english.as_str())),
            (None, Some(math)) => segments.push(Segment::Math(math.as_str())),
            (None, None) => {}
        }
        last = whole.end();
    }
    if last < text.len() {
        segments.push(Segment::Plain(&text[last..]));
    }

    segments
}

/// 只转义 `& < >`，不转义引号
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// 转义普通文本，再插入空白线与空位标记
fn escape_plain(text: &str, gaps: bool) -> String {
    let escaped = escape_text(text).replace(BLANK_TOKEN, BLANK_MARKER);
    if gaps {
        escaped.replace(GAP_TOKEN, GAP_MARKER)
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(text: &str) -> String {
        format!(r#"<span style="white-space: pre-wrap;">{}</span>"#, text)
    }

    #[test]
    fn test_plain_english_text() {
        let html = TextRenderer::new().render("What is 2 + 2?", Language::English);
        assert_eq!(
            html,
            format!(
                r#"<p class="LexicalTheme__paragraph">{}</p>"#,
                plain("What is 2 + 2?")
            )
        );
    }

    #[test]
    fn test_arabic_sets_rtl() {
        let html = TextRenderer::new().render("مرحبا", Language::Arabic);
        assert!(html.starts_with(r#"<p class="LexicalTheme__paragraph" dir="rtl">"#));
        assert!(html.contains("مرحبا"));
    }

    #[test]
    fn test_escapes_angle_brackets_but_not_quotes() {
        let html = TextRenderer::new().render(r#"a < b & "c""#, Language::English);
        assert!(html.contains(&plain(r#"a &lt; b &amp; "c""#)));
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(
            split_segments("Solve `x + 1` and ``F = ma`` now"),
            vec![
                Segment::Plain("Solve "),
                Segment::Math("x + 1"),
                Segment::Plain(" and "),
                Segment::MathEnglish("F = ma"),
                Segment::Plain(" now"),
            ]
        );
    }

    #[test]
    fn test_math_spans_in_arabic() {
        let renderer = TextRenderer::new();
        let html = renderer.render("`x` و ``x``", Language::Arabic);
        assert!(html.contains(r#"value="\seen" locale="ar" lang="ar""#));
        assert!(html.contains(r#"value="x" locale="en""#));
    }

    #[test]
    fn test_empty_math_span_is_dropped() {
        let html = TextRenderer::new().render("a `  ` b", Language::English);
        assert!(!html.contains("math-field"));
        assert_eq!(html.matches("pre-wrap").count(), 2);
    }

    #[test]
    fn test_blank_token_becomes_marker_once() {
        let html = TextRenderer::new().render("The capital is _____.", Language::English);
        assert_eq!(html.matches(BLANK_MARKER).count(), 1);
        assert!(!html.contains(BLANK_TOKEN));
        assert!(html.contains(&plain(&format!("The capital is {}.", BLANK_MARKER))));
    }

    #[test]
    fn test_gap_stem_marks_gaps_after_escaping() {
        let html = TextRenderer::new().render_gap_stem("A [BLANK] B [BLANK] <C>", Language::English);
        assert_eq!(html.matches(GAP_MARKER).count(), 2);
        assert!(html.contains("&lt;C&gt;"));
    }

    #[test]
    fn test_gap_token_is_literal_outside_gap_stems() {
        let html = TextRenderer::new().render("A [BLANK] B", Language::English);
        assert!(html.contains("[BLANK]"));
        assert!(!html.contains(GAP_MARKER));
    }

    #[test]
    fn test_author_written_marker_html_is_escaped() {
        let renderer = TextRenderer::new();
        for marker in [GAP_MARKER, BLANK_MARKER] {
            let text = format!("code sample: {}", marker);
            for html in [
                renderer.render(&text, Language::English),
                renderer.render_gap_stem(&text, Language::English),
            ] {
                assert!(html.contains("&lt;span data-node-type=\"blank-line\""));
                assert!(!html.contains(marker));
                assert!(html.contains("&amp;nbsp;"));
            }
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = TextRenderer::new();
        let text = "Find `Q'` when _____ and ``n``";
        assert_eq!(
            renderer.render(text, Language::Arabic),
            renderer.render(text, Language::Arabic)
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(TextRenderer::new().render("", Language::English), "");
    }
}
