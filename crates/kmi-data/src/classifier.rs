//! 업종 분류 파이프라인.
//!
//! 처리 흐름:
//! 1. 종목코드 → 기업코드 (DART 기업코드 저장소)
//! 2. DART 기업개황 API로 KSIC 코드 조회
//! 3. KSIC 코드표로 산업명/중분류 부여
//! 4. 규칙 테이블로 상위 업종 결정
//!
//! `classify`는 어떤 경우에도 에러를 밖으로 내보내지 않고, 실패를
//! `success=false` 레코드로 돌려줍니다.

use crate::error::{DataError, Result};
use crate::ksic::KsicMapper;
use crate::provider::dart::{DartClient, DartError};
use crate::storage::PgCorpCodeDirectory;
use kmi_core::{stock_span, AppConfig, ClassificationResult};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

/// 기업코드 조회 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpCodeSource {
    /// DART corpCode.xml 다운로드 (`force_refresh`이면 캐시 무시)
    Xml { force_refresh: bool },
    /// `dart_corp_codes` 테이블
    Database,
}

impl Default for CorpCodeSource {
    fn default() -> Self {
        CorpCodeSource::Xml {
            force_refresh: false,
        }
    }
}

/// 업종 분류기.
pub struct IndustryClassifier {
    dart: DartClient,
    mapper: KsicMapper,
}

impl IndustryClassifier {
    /// 이미 만든 클라이언트와 매퍼로 생성.
    pub fn new(dart: DartClient, mapper: KsicMapper) -> Self {
        info!(ksic_codes = mapper.len(), "Industry Classifier 초기화 완료");
        Self { dart, mapper }
    }

    /// 설정으로 클라이언트와 매퍼를 모두 만들어 생성.
    pub async fn from_config(config: &AppConfig, source: CorpCodeSource) -> Result<Self> {
        let dart = connect_dart_client(config, source).await?;
        let mapper = KsicMapper::new(config.ksic_path(), config.ksic.sheet_name.as_deref());
        Ok(Self::new(dart, mapper))
    }

    /// DART 클라이언트.
    pub fn dart(&self) -> &DartClient {
        &self.dart
    }

    /// KSIC 매퍼.
    pub fn mapper(&self) -> &KsicMapper {
        &self.mapper
    }

    /// 종목코드 하나를 분류합니다.
    pub async fn classify(&self, stock_code: &str) -> ClassificationResult {
        info!(stock_code, "업종 분류 시작");

        let industry = match self.dart.fetch_company_industry(stock_code).await {
            Ok(industry) => industry,
            Err(e) if e.is_resolution_miss() => {
                log_miss(stock_code, &e);
                return ClassificationResult::lookup_failed(stock_code);
            }
            Err(e) => {
                error!(stock_code, error = %e, "업종 분류 중 오류 발생");
                return ClassificationResult::errored(stock_code, e.to_string());
            }
        };

        let ksic = self.mapper.classify_industry(&industry.induty_code);
        let ksic_name = if ksic.ksic_name.is_empty() {
            industry.induty_name.clone()
        } else {
            ksic.ksic_name
        };

        let result = ClassificationResult::classified(
            stock_code,
            &industry,
            ksic_name,
            ksic.middle_class,
            ksic.top_industry,
        );

        info!(
            stock_code,
            corp_name = %industry.corp_name,
            top_industry = %result.top_industry,
            "업종 분류 완료"
        );
        result
    }

    /// 여러 종목을 순서대로 분류합니다.
    ///
    /// `save_path`가 있으면 결과 전체를 JSON으로 저장하며, 저장 실패만 `Err`.
    pub async fn batch_classify<S: AsRef<str>>(
        &self,
        stock_codes: &[S],
        save_path: Option<&Path>,
    ) -> Result<Vec<ClassificationResult>> {
        let total = stock_codes.len();
        info!(total, "일괄 분류 시작");

        let mut results = Vec::with_capacity(total);
        for (i, stock_code) in stock_codes.iter().enumerate() {
            info!("진행률: {}/{}", i + 1, total);
            let stock_code = stock_code.as_ref();
            let result = self
                .classify(stock_code)
                .instrument(stock_span!("classify", stock_code))
                .await;
            results.push(result);
        }

        let success = results.iter().filter(|r| r.success).count();
        info!(success, failed = total - success, "일괄 분류 완료");

        if let Some(path) = save_path {
            save_results(&results, path).await?;
        }

        Ok(results)
    }
}

/// 설정한 기업코드 저장소로 DART 클라이언트를 만듭니다.
pub async fn connect_dart_client(config: &AppConfig, source: CorpCodeSource) -> Result<DartClient> {
    match source {
        CorpCodeSource::Xml { force_refresh } => {
            DartClient::with_xml_directory(config.dart.clone(), force_refresh).await
        }
        CorpCodeSource::Database => {
            let url = config.database.url.as_deref().ok_or_else(|| {
                DataError::ConfigError("DATABASE_URL이 설정되지 않았습니다".to_string())
            })?;
            let directory =
                PgCorpCodeDirectory::connect(url, config.database.max_connections).await?;
            let count = directory.count().await?;
            info!(count, "dart_corp_codes 테이블에서 기업코드 로드");
            DartClient::new(config.dart.clone(), Arc::new(directory))
        }
    }
}

fn log_miss(stock_code: &str, err: &DartError) {
    match err {
        DartError::UnknownTicker(_) => warn!(stock_code, "DART 데이터 조회 실패: 종목코드 없음"),
        other => warn!(stock_code, error = %other, "DART 데이터 조회 실패"),
    }
}

/// 결과를 들여쓴 JSON으로 저장. 상위 디렉토리가 없으면 만듭니다.
pub async fn save_results(results: &[ClassificationResult], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(results)?;
    tokio::fs::write(path, json).await?;

    info!(path = %path.display(), count = results.len(), "결과 저장 완료");
    Ok(())
}
