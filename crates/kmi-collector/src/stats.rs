//! 분류 통계 구조체.

use kmi_core::{ClassificationResult, TopIndustry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// 분류 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationStats {
    /// 총 종목 수
    pub total: usize,
    /// 성공 횟수
    pub success: usize,
    /// DART 조회 실패 (미분류)
    pub unclassified: usize,
    /// 예상치 못한 오류
    pub errors: usize,
    /// 상위 업종별 종목 수 (성공 건만)
    pub by_industry: BTreeMap<String, usize>,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ClassificationStats {
    /// 분류 결과 목록으로 통계 계산
    pub fn from_results(results: &[ClassificationResult], elapsed: Duration) -> Self {
        let mut stats = Self {
            elapsed,
            ..Self::default()
        };
        for result in results {
            stats.record(result);
        }
        stats
    }

    /// 결과 하나 반영
    pub fn record(&mut self, result: &ClassificationResult) {
        self.total += 1;
        if result.success {
            self.success += 1;
            *self
                .by_industry
                .entry(result.top_industry.as_str().to_string())
                .or_insert(0) += 1;
        } else if result.top_industry == TopIndustry::Error {
            self.errors += 1;
        } else {
            self.unclassified += 1;
        }
    }

    /// 실패 횟수
    pub fn failed(&self) -> usize {
        self.unclassified + self.errors
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            success = self.success,
            unclassified = self.unclassified,
            errors = self.errors,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "분류 완료"
        );

        for (industry, count) in &self.by_industry {
            tracing::debug!(industry = %industry, count, "업종별 종목 수");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmi_core::CompanyIndustry;

    fn classified(stock_code: &str, industry: TopIndustry) -> ClassificationResult {
        let company = CompanyIndustry {
            stock_code: stock_code.to_string(),
            corp_code: "00000000".to_string(),
            corp_name: "테스트".to_string(),
            induty_code: "26110".to_string(),
            induty_name: String::new(),
        };
        ClassificationResult::classified(
            stock_code,
            &company,
            String::new(),
            "26".to_string(),
            industry,
        )
    }

    #[test]
    fn test_from_results() {
        let results = vec![
            classified("005930", TopIndustry::Semiconductors),
            classified("000660", TopIndustry::Semiconductors),
            classified("035720", TopIndustry::Software),
            ClassificationResult::lookup_failed("999999"),
            ClassificationResult::errored("123456", "connection refused"),
        ];
        let stats = ClassificationStats::from_results(&results, Duration::from_secs(3));

        assert_eq!(stats.total, 5);
        assert_eq!(stats.success, 3);
        assert_eq!(stats.unclassified, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.failed(), 2);
        assert_eq!(stats.by_industry["반도체와 반도체장비"], 2);
        assert_eq!(stats.by_industry["IT·소프트웨어"], 1);
        assert!((stats.success_rate() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = ClassificationStats::from_results(&[], Duration::ZERO);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.success_rate(), 0.0);
        assert!(stats.by_industry.is_empty());
    }
}
