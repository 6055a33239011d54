//! 설정 파일 + 환경변수 기반 설정 모듈.

use crate::Result;
use kmi_core::AppConfig;
use std::path::{Path, PathBuf};

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 일괄 분류 결과 기본 파일명
pub const DEFAULT_RESULT_FILE: &str = "industry_results.json";

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 분류 파이프라인 설정 (DART, KSIC, DB, 로깅)
    pub app: AppConfig,
    /// 일괄 분류 설정
    pub batch: BatchConfig,
    /// 기업명 검색 설정
    pub search: SearchConfig,
}

/// 일괄 분류 설정
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// 결과 저장 디렉토리
    pub output_dir: PathBuf,
}

/// 기업명 검색 설정
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// 기본 최대 결과 수
    pub default_limit: usize,
}

impl CollectorConfig {
    /// 설정 파일(선택)과 환경변수에서 설정 로드
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let app = AppConfig::load(path)?;
        Ok(Self::with_app(app))
    }

    /// `KMI_CONFIG` 환경변수(없으면 기본 경로)의 설정 파일로 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = std::env::var("KMI_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// 이미 로드한 파이프라인 설정에 환경변수 기반 설정을 덧붙임
    pub fn with_app(app: AppConfig) -> Self {
        let output_dir = std::env::var("CLASSIFY_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app.dart.data_dir.join("results"));

        Self {
            batch: BatchConfig { output_dir },
            search: SearchConfig {
                default_limit: env_var_parse("SEARCH_LIMIT", 10),
            },
            app,
        }
    }
}

impl BatchConfig {
    /// 결과 파일 기본 경로
    pub fn default_output(&self) -> PathBuf {
        self.output_dir.join(DEFAULT_RESULT_FILE)
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmi_core::DartConfig;

    #[test]
    fn test_default_output_under_data_dir() {
        let app = AppConfig {
            dart: DartConfig::new("key").with_data_dir("/tmp/kmi-data"),
            ..Default::default()
        };
        let config = CollectorConfig::with_app(app);

        if std::env::var("CLASSIFY_OUTPUT_DIR").is_err() {
            assert_eq!(
                config.batch.default_output(),
                PathBuf::from("/tmp/kmi-data/results/industry_results.json")
            );
        }
        assert!(config.search.default_limit > 0);
    }

    #[test]
    fn test_env_var_parse_fallback() {
        assert_eq!(env_var_parse("KMI_TEST_UNSET_VARIABLE", 7usize), 7);
    }
}
