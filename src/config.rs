use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认配置文件
const DEFAULT_CONFIG_FILE: &str = "question_json.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// 标记文档路径（文件或文件夹）
    pub input_path: PathBuf,
    /// JSON 输出目录
    pub output_dir: PathBuf,
    /// 同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行日志文件
    pub output_log_file: String,
    /// 失败题目报告
    pub failure_report_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("questions"),
            output_dir: PathBuf::from("generated_questions"),
            max_concurrent_documents: 4,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            failure_report_file: "failed.txt".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（如果存在）→ 环境变量
    pub fn load() -> Result<Self> {
        let explicit = std::env::var("QUESTION_JSON_CONFIG").ok();
        let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);

        let base = if explicit.is_some() || Path::new(path).exists() {
            Self::from_toml_file(Path::new(path))?
        } else {
            Self::default()
        };

        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件读取，缺失的键使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 用环境变量覆盖，无法解析的值保留原值
    pub fn with_env_overrides(self) -> Self {
        Self {
            input_path: std::env::var("INPUT_PATH").map(PathBuf::from).unwrap_or(self.input_path),
            output_dir: std::env::var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            max_concurrent_documents: std::env::var("MAX_CONCURRENT_DOCUMENTS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_concurrent_documents),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            failure_report_file: std::env::var("FAILURE_REPORT_FILE").unwrap_or(self.failure_report_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("output_dir = \"out\"\nmax_concurrent_documents = 2\n").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_concurrent_documents, 2);
        assert_eq!(config.input_path, PathBuf::from("questions"));
        assert_eq!(config.failure_report_file, "failed.txt");
    }

    #[test]
    fn test_unknown_toml_key_is_rejected() {
        assert!(Config::from_toml_str("browser_debug_port = 2001\n").is_err());
    }
}
