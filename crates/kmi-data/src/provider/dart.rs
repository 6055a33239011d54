//! DART Open API 클라이언트.
//!
//! 금융감독원 DART 공시 API로 종목의 업종코드(KSIC)를 조회합니다.
//!
//! 1. 종목코드 → 기업코드 (`CorpCodeDirectory`: XML 기업코드표 또는 DB)
//! 2. 기업코드 → 기업개황 (`/company.json`의 `induty_code`)
//!
//! `fetch_*`/`lookup_*` 메서드는 실패 종류를 `DartError`로 돌려주고,
//! `get_*` 메서드는 실패를 로그로 남긴 뒤 `None`으로 바꿉니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use kmi_core::DartConfig;
//! use kmi_data::provider::dart::DartClient;
//!
//! let client = DartClient::with_xml_directory(DartConfig::new(api_key), false).await?;
//! let industry = client.get_company_industry("005930").await;
//! ```

use super::corp_code::{CorpCodeDirectory, CorpCodeDownloader, CorpCodeMap};
use super::throttle::Throttle;
use crate::error::DataError;
use kmi_core::{normalize_stock_code, CompanyIndustry, CorpRecord, DartConfig};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// DART 정상 응답 상태 코드.
pub const DART_STATUS_OK: &str = "000";

/// DART 조회 에러.
#[derive(Debug, Error)]
pub enum DartError {
    /// 기업코드표에 없는 종목
    #[error("종목코드를 찾을 수 없음: {0}")]
    UnknownTicker(String),

    /// DART 응답의 status가 "000"이 아님
    #[error("DART API 에러: {status} - {message}")]
    Api { status: String, message: String },

    /// 네트워크/HTTP 상태/응답 디코딩 실패
    #[error("API 호출 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 기업코드 저장소 조회 실패
    #[error("기업코드 조회 실패: {0}")]
    Directory(#[from] DataError),
}

impl DartError {
    /// 조회 실패(미등록 종목 또는 DART 측 실패)인지.
    ///
    /// `false`이면 저장소 장애처럼 예상하지 못한 오류입니다.
    pub fn is_resolution_miss(&self) -> bool {
        !matches!(self, DartError::Directory(_))
    }
}

/// DART 조회 결과 타입.
pub type DartResult<T> = std::result::Result<T, DartError>;

/// 기업개황 응답 (`/company.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// 상태 코드 ("000" = 정상)
    pub status: String,
    /// 상태 메시지
    #[serde(default)]
    pub message: String,
    /// 기업코드
    #[serde(default)]
    pub corp_code: Option<String>,
    /// 정식 회사명
    #[serde(default)]
    pub corp_name: Option<String>,
    /// 종목코드
    #[serde(default)]
    pub stock_code: Option<String>,
    /// 업종코드 (KSIC)
    #[serde(default)]
    pub induty_code: Option<String>,
    /// 업종명
    #[serde(default)]
    pub induty_name: Option<String>,
    /// 나머지 필드 (대표자명, 주소, 설립일 등)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CompanyProfile {
    /// 정상 응답인지.
    pub fn is_ok(&self) -> bool {
        self.status == DART_STATUS_OK
    }
}

/// DART HTTP 호출 (인증키, 타임아웃, 요청 간격 관리).
pub struct DartHttpClient {
    client: Client,
    api_key: SecretString,
    config: DartConfig,
    throttle: Throttle,
}

impl DartHttpClient {
    /// 새 HTTP 클라이언트 생성. 인증키가 없으면 에러.
    pub fn new(config: DartConfig) -> crate::Result<Self> {
        let api_key = SecretString::new(config.require_api_key()?.into());

        let client = Client::builder()
            .timeout(config.timeout())
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            api_key,
            throttle: Throttle::new(config.min_request_interval()),
            config,
        })
    }

    /// 설정.
    pub fn config(&self) -> &DartConfig {
        &self.config
    }

    /// 인증키를 붙여 GET 요청. HTTP 에러 상태는 `Err`.
    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> reqwest::Result<reqwest::Response> {
        self.throttle.wait().await;

        self.client
            .get(url)
            .query(&[("crtfc_key", self.api_key.expose_secret())])
            .query(params)
            .send()
            .await?
            .error_for_status()
    }
}

/// DART API 클라이언트.
pub struct DartClient {
    http: DartHttpClient,
    directory: Arc<dyn CorpCodeDirectory>,
}

impl DartClient {
    /// 기업코드 저장소를 주입해 생성.
    pub fn new(config: DartConfig, directory: Arc<dyn CorpCodeDirectory>) -> crate::Result<Self> {
        let http = DartHttpClient::new(config)?;
        info!(directory = directory.name(), "DART Client 초기화 완료");
        Ok(Self { http, directory })
    }

    /// corpCode.xml 기반 클라이언트.
    ///
    /// 기업코드표를 (필요하면 내려받아) 생성 시점에 모두 읽어 둡니다.
    pub async fn with_xml_directory(config: DartConfig, force_refresh: bool) -> crate::Result<Self> {
        let http = DartHttpClient::new(config)?;
        let xml_path = CorpCodeDownloader::new(&http).download(force_refresh).await?;
        let map = CorpCodeMap::load(&xml_path)?;

        info!(
            directory = map.name(),
            count = map.len(),
            "DART Client 초기화 완료"
        );
        Ok(Self {
            http,
            directory: Arc::new(map),
        })
    }

    /// 사용 중인 기업코드 저장소.
    pub fn directory(&self) -> &dyn CorpCodeDirectory {
        self.directory.as_ref()
    }

    /// 종목코드로 기업코드 레코드 조회.
    pub async fn lookup_corp_code(&self, stock_code: &str) -> DartResult<CorpRecord> {
        let normalized = normalize_stock_code(stock_code);
        self.directory
            .find_by_stock_code(&normalized)
            .await?
            .ok_or(DartError::UnknownTicker(normalized))
    }

    /// 종목코드로 기업코드 레코드 조회. 없거나 실패하면 `None`.
    pub async fn get_corp_code(&self, stock_code: &str) -> Option<CorpRecord> {
        match self.lookup_corp_code(stock_code).await {
            Ok(record) => Some(record),
            Err(DartError::UnknownTicker(code)) => {
                warn!(stock_code = %code, "종목코드를 찾을 수 없음");
                None
            }
            Err(e) => {
                error!(stock_code, error = %e, "기업코드 조회 실패");
                None
            }
        }
    }

    /// 기업개황 API 호출.
    pub async fn fetch_company_info(&self, corp_code: &str) -> DartResult<CompanyProfile> {
        info!(corp_code, "기업개황 조회");

        let url = self.http.config().company_url();
        let profile: CompanyProfile = self
            .http
            .get(&url, &[("corp_code", corp_code)])
            .await?
            .json()
            .await?;

        if !profile.is_ok() {
            return Err(DartError::Api {
                status: profile.status,
                message: if profile.message.is_empty() {
                    "Unknown error".to_string()
                } else {
                    profile.message
                },
            });
        }

        Ok(profile)
    }

    /// 기업개황 API 호출. 실패하면 로그를 남기고 `None`.
    pub async fn get_company_info(&self, corp_code: &str) -> Option<CompanyProfile> {
        match self.fetch_company_info(corp_code).await {
            Ok(profile) => Some(profile),
            Err(DartError::Api { status, message }) => {
                warn!(corp_code, %status, %message, "DART API 에러");
                None
            }
            Err(e) => {
                error!(corp_code, error = %e, "API 호출 실패");
                None
            }
        }
    }

    /// 종목코드로 업종 정보 조회.
    pub async fn fetch_company_industry(&self, stock_code: &str) -> DartResult<CompanyIndustry> {
        let record = self.lookup_corp_code(stock_code).await?;
        let profile = self.fetch_company_info(&record.corp_code).await?;

        Ok(CompanyIndustry {
            stock_code: normalize_stock_code(stock_code),
            corp_code: record.corp_code,
            corp_name: record.corp_name,
            induty_code: profile.induty_code.unwrap_or_default(),
            induty_name: profile.induty_name.unwrap_or_default(),
        })
    }

    /// 종목코드로 업종 정보 조회. 어느 단계든 실패하면 `None`.
    pub async fn get_company_industry(&self, stock_code: &str) -> Option<CompanyIndustry> {
        match self.fetch_company_industry(stock_code).await {
            Ok(industry) => Some(industry),
            Err(e) => {
                warn!(stock_code, error = %e, "업종 정보 조회 실패");
                None
            }
        }
    }

    /// 회사명 부분 일치 검색.
    pub async fn search_by_name(&self, pattern: &str, limit: usize) -> Vec<CorpRecord> {
        match self.directory.search_by_name(pattern, limit).await {
            Ok(records) => records,
            Err(e) => {
                error!(pattern, error = %e, "기업명 검색 실패");
                Vec::new()
            }
        }
    }
}
