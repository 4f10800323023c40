use serde::Serialize;

/// 题目语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    /// 阿拉伯语
    #[serde(rename = "ar")]
    Arabic,
    /// 英语
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// 获取语言代码
    pub fn code(self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::English => "en",
        }
    }

    /// 从语言代码解析（精确匹配，区分大小写）
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ar" => Some(Language::Arabic),
            "en" => Some(Language::English),
            _ => None,
        }
    }

    /// 输出记录中的方言列表
    pub fn dialects(self) -> Vec<String> {
        let dialects: &[&str] = match self {
            Language::Arabic => &["modern_standard"],
            Language::English => &["american", "british"],
        };
        dialects.iter().map(|d| d.to_string()).collect()
    }

    /// 是否从右向左书写
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Arabic)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
