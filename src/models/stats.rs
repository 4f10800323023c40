use serde::Serialize;

/// 处理失败的题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedQuestion {
    /// 题目在文档中的序号（从1开始）
    pub ordinal: usize,
    pub reason: String,
}

/// 一次批量处理的统计
///
/// 每次批量处理开始时重置，不在并发任务之间共享
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    pub total_questions: usize,
    pub successful: usize,
    pub failed: usize,
    pub generated_files: Vec<String>,
    pub failures: Vec<FailedQuestion>,
}

impl ProcessingStats {
    pub fn record_success(&mut self, file_name: String) {
        self.successful += 1;
        self.generated_files.push(file_name);
    }

    pub fn record_failure(&mut self, ordinal: usize, reason: String) {
        self.failed += 1;
        self.failures.push(FailedQuestion { ordinal, reason });
    }

    /// 成功率（百分比），没有题目时为 0
    pub fn success_rate(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.successful as f64 / self.total_questions as f64 * 100.0
        }
    }

    /// 合并另一份统计（用于汇总多个文档）
    pub fn absorb(&mut self, other: &ProcessingStats) {
        self.total_questions += other.total_questions;
        self.successful += other.successful;
        self.failed += other.failed;
        self.generated_files
            .extend(other.generated_files.iter().cloned());
        self.failures.extend(other.failures.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let mut stats = ProcessingStats::default();
        assert_eq!(stats.success_rate(), 0.0);

        stats.total_questions = 4;
        stats.record_success("1.json".into());
        stats.record_failure(2, "bad".into());
        stats.record_success("3.json".into());
        stats.record_success("4.json".into());
        assert_eq!(stats.success_rate(), 75.0);
        assert_eq!(stats.failures[0].ordinal, 2);
    }
}
