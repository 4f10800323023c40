//! 公式渲染 - 业务能力层
//!
//! 把单个公式包装为只读的行内 `math-field` 片段

use std::fmt::Write;

use tracing::warn;

use crate::error::RenderError;
use crate::models::language::Language;
use crate::services::glyph_map::GlyphSubstitution;

/// 公式渲染器
#[derive(Debug, Clone, Default)]
pub struct MathFieldRenderer {
    glyphs: GlyphSubstitution,
}

impl MathFieldRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 渲染公式
    ///
    /// # 参数
    /// - `equation`: 公式文本
    /// - `language`: 题目语言
    /// - `force_en`: 强制按英文渲染（双反引号）
    ///
    /// # 返回
    /// 空公式返回空字符串；内部出错时返回带 `error` 类名的片段
    pub fn render(&self, equation: &str, language: Language, force_en: bool) -> String {
        if equation.is_empty() {
            return String::new();
        }

        self.try_render(equation, language, force_en)
            .unwrap_or_else(|e| {
                warn!("公式渲染失败: {} ({})", equation, e);
                error_fragment(equation)
            })
    }

    fn try_render(
        &self,
        equation: &str,
        language: Language,
        force_en: bool,
    ) -> Result<String, RenderError> {
        let is_arabic = language == Language::Arabic && !force_en;
        let latex_value = if is_arabic {
            self.glyphs.convert(equation)
        } else {
            equation.to_string()
        };
        let locale_attrs = if is_arabic {
            r#" locale="ar" lang="ar""#
        } else {
            r#" locale="en""#
        };

        let mut html = String::new();
        write!(
            html,
            r#"<span class="LexicalTheme__math--inline" data-node-type="math" data-node-variation="inline"><math-field default-mode="inline-math" read-only="true" value="{}"{}></math-field></span>"#,
            escape_attribute(&latex_value),
            locale_attrs
        )?;
        Ok(html)
    }
}

/// 降级片段，公式原文同样转义
fn error_fragment(equation: &str) -> String {
    format!(
        r#"<span class="error">Math field error: {}</span>"#,
        escape_attribute(equation)
    )
}

/// 转义属性值中的 `& < > " '`
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_english_field() {
        let html = MathFieldRenderer::new().render("x^2", Language::English, false);
        assert_eq!(
            html,
            r#"<span class="LexicalTheme__math--inline" data-node-type="math" data-node-variation="inline"><math-field default-mode="inline-math" read-only="true" value="x^2" locale="en"></math-field></span>"#
        );
    }

    #[test]
    fn test_arabic_field_substitutes_glyphs() {
        let html = MathFieldRenderer::new().render("x + 1", Language::Arabic, false);
        assert!(html.contains(r#"value="\seen + 1""#));
        assert!(html.contains(r#" locale="ar" lang="ar""#));
    }

    #[test]
    fn test_force_english_skips_substitution() {
        let html = MathFieldRenderer::new().render("x + 1", Language::Arabic, true);
        assert!(html.contains(r#"value="x + 1" locale="en""#));
    }

    #[test]
    fn test_value_attribute_is_escaped() {
        let html = MathFieldRenderer::new().render(r#"a<b & "c" 'd'>"#, Language::English, false);
        assert!(html.contains(r#"value="a&lt;b &amp; &quot;c&quot; &#39;d&#39;&gt;""#));
    }

    #[test]
    fn test_error_fragment_escapes_equation() {
        assert_eq!(
            error_fragment("<b>x</b>"),
            r#"<span class="error">Math field error: &lt;b&gt;x&lt;/b&gt;</span>"#
        );
    }

    #[test]
    fn test_empty_equation() {
        assert_eq!(MathFieldRenderer::new().render("", Language::Arabic, false), "");
    }
}
