//! 阿拉伯字形替换 - 业务能力层
//!
//! 将公式中的 ASCII 符号替换为阿拉伯字形的 LaTeX 命令。
//! 公式里已有的 LaTeX 命令先用占位符保护起来，替换完成后按原顺序还原。

use std::sync::LazyLock;

use phf::phf_ordered_map;
use regex::Regex;
use tracing::warn;

use crate::error::RenderError;

/// 固定替换表，顺序即同长度键之间的优先级
pub static ARABIC_GLYPHS: phf::OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    // 函数与运算符
    "F(x)" => "\\dotlessqaft (\\seen)",
    "Q'" => "\\dotlessnoont \\prime",
    // 大写字母
    "N" => "\\tah",
    "Z" => "\\sadt",
    "Q" => "\\dotlessnoont",
    "X" => "\\seent",
    "Y" => "\\sadt",
    "A" => "\\alt{\\alef}",
    "B" => "\\beh",
    "C" => "\\jeemi",
    "D" => "\\dal",
    "E" => "\\hehi",
    "F" => "\\waw",
    "M" => "\\meem",
    "K" => "\\kaf",
    "L" => "\\lam",
    "O" => "\\waw",
    "R" => "\\haht",
    // 小写字母
    "x" => "\\seen",
    "y" => "\\sad",
    "z" => "\\ain",
    "n" => "\\noon",
    "s" => "\\feh",
    "r" => "\\aint",
};

/// 反斜杠命令，可带一个 `{...}` 参数
static LATEX_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+(?:\{[^}]*\})?").expect("LaTeX 命令正则无效"));

/// 占位符边界字符（Unicode 私用区），替换表的键不会匹配到它们
const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// 阿拉伯字形替换器
#[derive(Debug, Clone)]
pub struct GlyphSubstitution {
    /// 按键长度降序排列；同长度保持替换表顺序
    entries_longest_first: Vec<(&'static str, &'static str)>,
}

impl GlyphSubstitution {
    pub fn new() -> Self {
        let mut entries: Vec<(&'static str, &'static str)> = ARABIC_GLYPHS
            .entries()
            .map(|(key, value)| (*key, *value))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            entries_longest_first: entries,
        }
    }

    /// 转换公式，失败时原样返回
    pub fn convert(&self, equation: &str) -> String {
        if equation.is_empty() {
            return String::new();
        }

        match self.try_convert(equation) {
            Ok(converted) => converted,
            Err(e) => {
                warn!("阿拉伯字形转换失败，保留原公式: {} ({})", equation, e);
                equation.to_string()
            }
        }
    }

    pub(crate) fn try_convert(&self, equation: &str) -> Result<String, RenderError> {
        if let Some(c) = equation
            .chars()
            .find(|c| *c == PLACEHOLDER_OPEN || *c == PLACEHOLDER_CLOSE)
        {
            return Err(RenderError::ReservedCharacter(c));
        }

        // 1. 保护已有的 LaTeX 命令
        let mut commands = Vec::new();
        let protected = LATEX_COMMAND.replace_all(equation, |caps: &regex::Captures| {
            let placeholder = placeholder(commands.len());
            commands.push(caps[0].to_string());
            placeholder
        });

        // 2. 按空格切分，逐段替换
        let converted = protected
            .split(' ')
            .map(|fragment| match ARABIC_GLYPHS.get(fragment) {
                Some(replacement) => replacement.to_string(),
                None => self.substitute_within(fragment),
            })
            .collect::<Vec<_>>()
            .join(" ");

        // 3. 按原顺序还原 LaTeX 命令
        let mut restored = converted;
        for (i, command) in commands.iter().enumerate() {
            let placeholder = placeholder(i);
            if !restored.contains(&placeholder) {
                return Err(RenderError::PlaceholderLost(i));
            }
            restored = restored.replacen(&placeholder, command, 1);
        }

        Ok(restored)
    }

    /// 单次从左到右扫描，每个位置优先匹配最长的键；替换结果不会被再次替换
    fn substitute_within(&self, fragment: &str) -> String {
        let mut out = String::with_capacity(fragment.len());
        let mut rest = fragment;

        'scan: while let Some(c) = rest.chars().next() {
            for (key, replacement) in &self.entries_longest_first {
                if rest.starts_with(key) {
                    out.push_str(replacement);
                    rest = &rest[key.len()..];
                    continue 'scan;
                }
            }
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }

        out
    }
}

impl Default for GlyphSubstitution {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder(i: usize) -> String {
    format!("{PLACEHOLDER_OPEN}{i}{PLACEHOLDER_CLOSE}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("x", "\\seen")]
    #[case("F(x)", "\\dotlessqaft (\\seen)")]
    #[case("Q'", "\\dotlessnoont \\prime")]
    #[case("x + y = 5", "\\seen + \\sad = 5")]
    #[case("2x", "2\\seen")]
    #[case("3", "3")]
    fn test_convert(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(GlyphSubstitution::new().convert(input), expected);
    }

    #[test]
    fn test_longest_key_wins() {
        // "F(x)" 出现在片段内部时，优先于 "F" 与 "x"
        let glyphs = GlyphSubstitution::new();
        assert_eq!(glyphs.convert("2F(x)"), "2\\dotlessqaft (\\seen)");
        assert_eq!(glyphs.convert("Q'+1"), "\\dotlessnoont \\prime+1");
    }

    #[test]
    fn test_replacements_are_not_substituted_again() {
        // "\seen" 中的 s 和 n 不会再被替换
        assert_eq!(GlyphSubstitution::new().convert("xn"), "\\seen\\noon");
    }

    #[rstest]
    #[case("\\frac{a}{b}")]
    #[case("\\sqrt{x} + x")]
    #[case("\\alpha Nx \\beta")]
    #[case("\\frac{X}{Y}")]
    fn test_latex_commands_untouched(#[case] input: &str) {
        let out = GlyphSubstitution::new().convert(input);
        for m in LATEX_COMMAND.find_iter(input) {
            assert!(out.contains(m.as_str()), "{} 丢失于 {}", m.as_str(), out);
        }
    }

    #[test]
    fn test_command_with_matching_letters() {
        let out = GlyphSubstitution::new().convert("\\sqrt{x} + x");
        assert_eq!(out, "\\sqrt{x} + \\seen");
    }

    #[test]
    fn test_empty_and_reserved_input() {
        let glyphs = GlyphSubstitution::new();
        assert_eq!(glyphs.convert(""), "");

        let reserved = "x \u{E000}0\u{E001}";
        assert!(glyphs.try_convert(reserved).is_err());
        assert_eq!(glyphs.convert(reserved), reserved);
    }

    #[test]
    fn test_keys_sorted_longest_first() {
        let glyphs = GlyphSubstitution::new();
        assert_eq!(glyphs.entries_longest_first[0].0, "F(x)");
        assert_eq!(glyphs.entries_longest_first[1].0, "Q'");
        assert_eq!(glyphs.entries_longest_first.len(), ARABIC_GLYPHS.len());
    }
}
