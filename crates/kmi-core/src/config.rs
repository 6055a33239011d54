//! 설정 관리.
//!
//! 기본값 → 설정 파일(TOML, 선택) → 환경변수 순으로 덮어씁니다.
//! 원래 스크립트들이 쓰던 `DART_API_KEY`, `DATABASE_URL`, `LOG_LEVEL`
//! 환경변수도 그대로 인식합니다.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// DART Open API 기본 URL.
pub const DART_API_BASE_URL: &str = "https://opendart.fss.or.kr/api";

/// DART API 키 발급 안내 URL.
const DART_API_KEY_GUIDE: &str = "https://opendart.fss.or.kr/";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// DART 설정
    pub dart: DartConfig,
    /// KSIC 데이터 설정
    pub ksic: KsicConfig,
    /// 데이터베이스 설정 (dart_corp_codes 테이블 조회용)
    pub database: DatabaseConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// DART API 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DartConfig {
    /// 인증키 (crtfc_key)
    #[serde(skip_serializing)]
    pub api_key: String,
    /// API 기본 URL
    pub base_url: String,
    /// 초당 최대 요청 수
    pub rate_limit: f64,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 데이터 디렉토리 (dart/, ksic/ 하위 디렉토리 사용)
    pub data_dir: PathBuf,
    /// 기업코드 XML 재사용 기간 (시간)
    pub corp_code_cache_hours: u64,
}

impl Default for DartConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DART_API_BASE_URL.to_string(),
            rate_limit: 1.0,
            timeout_secs: 30,
            data_dir: PathBuf::from("scripts/data"),
            corp_code_cache_hours: 24,
        }
    }
}

impl DartConfig {
    /// 인증키로 기본 설정 생성.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// API 기본 URL 설정 (테스트 서버 등).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 초당 요청 수 설정.
    pub fn with_rate_limit(mut self, rate_limit: f64) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// 데이터 디렉토리 설정.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// 요청 간 최소 간격. `rate_limit`이 0 이하이면 제한 없음.
    ///
    /// 간격이 `Duration`으로 표현할 수 없을 만큼 크면 `Duration::MAX`.
    pub fn min_request_interval(&self) -> Duration {
        if self.rate_limit > 0.0 && self.rate_limit.is_finite() {
            Duration::try_from_secs_f64(1.0 / self.rate_limit).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }

    /// 요청 타임아웃.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 기업개황 API URL.
    pub fn company_url(&self) -> String {
        format!("{}/company.json", self.base_url)
    }

    /// 기업코드 ZIP 다운로드 URL.
    pub fn corp_code_url(&self) -> String {
        format!("{}/corpCode.xml", self.base_url)
    }

    /// DART 파일 저장 디렉토리.
    pub fn dart_dir(&self) -> PathBuf {
        self.data_dir.join("dart")
    }

    /// 다운로드한 ZIP 경로.
    pub fn corp_code_zip_path(&self) -> PathBuf {
        self.dart_dir().join("corpCode.zip")
    }

    /// 압축 해제된 XML 경로.
    pub fn corp_code_xml_path(&self) -> PathBuf {
        self.dart_dir().join("CORPCODE.xml")
    }

    /// 기업코드 XML 재사용 기간.
    pub fn corp_code_max_age(&self) -> Duration {
        Duration::from_secs(self.corp_code_cache_hours.saturating_mul(3600))
    }

    /// 인증키 존재 여부 검증.
    pub fn require_api_key(&self) -> CoreResult<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(CoreError::Config(format!(
                "DART_API_KEY가 설정되지 않았습니다. 환경변수 DART_API_KEY를 설정하거나 .env 파일을 생성하세요. (발급: {})",
                DART_API_KEY_GUIDE
            )));
        }
        Ok(key)
    }
}

/// KSIC 스프레드시트 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct KsicConfig {
    /// KSIC 코드표 경로 (.xlsx/.xls/.ods/.csv). 없으면 `<data_dir>/ksic/ksic_industry.xlsx`
    pub path: Option<PathBuf>,
    /// 시트 이름 (없으면 첫 번째 시트)
    pub sheet_name: Option<String>,
}

impl KsicConfig {
    /// 실제 사용할 코드표 경로.
    pub fn resolve_path(&self, data_dir: &Path) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| data_dir.join("ksic").join("ksic_industry.xlsx"))
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 접속 URL (없으면 DB 기반 조회 비활성)
    #[serde(skip_serializing)]
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    /// 환경 변수 형식: `KMI__DART__RATE_LIMIT=2.0`.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("KMI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.apply_plain_env();
        Ok(config)
    }

    /// 접두사 없는 환경변수(`DART_API_KEY`, `DATABASE_URL`, `LOG_LEVEL`)를 반영합니다.
    fn apply_plain_env(&mut self) {
        if let Ok(key) = std::env::var("DART_API_KEY") {
            if !key.trim().is_empty() {
                self.dart.api_key = key;
            }
        }
        if self.database.url.is_none() {
            self.database.url = std::env::var("DATABASE_URL").ok();
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
    }

    /// KSIC 코드표 경로.
    pub fn ksic_path(&self) -> PathBuf {
        self.ksic.resolve_path(&self.dart.data_dir)
    }

    /// 설정 검증 및 데이터 디렉토리 생성.
    pub fn validate(&self) -> CoreResult<()> {
        self.dart.require_api_key()?;

        if self.dart.timeout_secs == 0 {
            return Err(CoreError::Config("timeout_secs는 0보다 커야 합니다".to_string()));
        }
        if !self.dart.rate_limit.is_finite() || self.dart.rate_limit < 0.0 {
            return Err(CoreError::Config(format!(
                "rate_limit은 0 이상의 유한한 값이어야 합니다: {}",
                self.dart.rate_limit
            )));
        }

        std::fs::create_dir_all(self.dart.dart_dir())?;
        std::fs::create_dir_all(self.dart.data_dir.join("ksic"))?;
        std::fs::create_dir_all(self.dart.data_dir.join("cache"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dart_defaults() {
        let config = DartConfig::default();
        assert_eq!(config.base_url, DART_API_BASE_URL);
        assert_eq!(config.min_request_interval(), Duration::from_secs(1));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.corp_code_max_age(), Duration::from_secs(24 * 3600));
        assert_eq!(
            config.corp_code_xml_path(),
            PathBuf::from("scripts/data/dart/CORPCODE.xml")
        );
    }

    #[test]
    fn test_rate_limit_interval() {
        let config = DartConfig::new("key").with_rate_limit(4.0);
        assert_eq!(config.min_request_interval(), Duration::from_millis(250));

        let unlimited = DartConfig::new("key").with_rate_limit(0.0);
        assert_eq!(unlimited.min_request_interval(), Duration::ZERO);
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        let tiny = DartConfig::new("key").with_rate_limit(1e-300);
        assert_eq!(tiny.min_request_interval(), Duration::MAX);

        let nan = DartConfig::new("key").with_rate_limit(f64::NAN);
        assert_eq!(nan.min_request_interval(), Duration::ZERO);

        let mut config = DartConfig::new("key");
        config.corp_code_cache_hours = u64::MAX;
        assert_eq!(config.corp_code_max_age(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_validate_rejects_invalid_rate_limit() {
        let dir = tempfile::tempdir().unwrap();
        for rate_limit in [f64::NAN, f64::INFINITY, -1.0] {
            let mut config = AppConfig::default();
            config.dart = DartConfig::new("key")
                .with_data_dir(dir.path())
                .with_rate_limit(rate_limit);
            assert!(matches!(config.validate(), Err(CoreError::Config(_))));
        }
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = DartConfig::new("key").with_base_url("http://127.0.0.1:1234/");
        assert_eq!(config.company_url(), "http://127.0.0.1:1234/company.json");
        assert_eq!(config.corp_code_url(), "http://127.0.0.1:1234/corpCode.xml");
    }

    #[test]
    fn test_missing_api_key() {
        let config = DartConfig::new("   ");
        assert!(matches!(config.require_api_key(), Err(CoreError::Config(_))));
        assert_eq!(DartConfig::new("abc").require_api_key().unwrap(), "abc");
    }

    #[test]
    fn test_ksic_path_resolution() {
        let default = KsicConfig::default();
        assert_eq!(
            default.resolve_path(Path::new("data")),
            PathBuf::from("data/ksic/ksic_industry.xlsx")
        );

        let custom = KsicConfig {
            path: Some(PathBuf::from("ksic_mapping.csv")),
            sheet_name: None,
        };
        assert_eq!(custom.resolve_path(Path::new("data")), PathBuf::from("ksic_mapping.csv"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kmi.toml");
        std::fs::write(
            &path,
            r#"
[dart]
rate_limit = 2.5
corp_code_cache_hours = 6

[ksic]
sheet_name = "11차"
"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.dart.rate_limit, 2.5);
        assert_eq!(config.dart.corp_code_cache_hours, 6);
        assert_eq!(config.dart.timeout_secs, 30);
        assert_eq!(config.ksic.sheet_name.as_deref(), Some("11차"));
    }

    #[test]
    fn test_validate_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.dart = DartConfig::new("key").with_data_dir(dir.path().join("data"));

        config.validate().unwrap();
        assert!(dir.path().join("data/dart").is_dir());
        assert!(dir.path().join("data/ksic").is_dir());
    }
}
