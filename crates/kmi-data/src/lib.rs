//! 업종 분류 데이터 소스와 파이프라인.
//!
//! 이 crate는 다음을 제공합니다:
//! - KSIC 접두사 → 상위 업종 규칙 테이블
//! - KSIC 코드표(xlsx/csv) 매퍼
//! - DART Open API 클라이언트 (기업코드 XML / DB 저장소)
//! - 종목코드 → 상위 업종 분류기

pub mod classifier;
pub mod error;
pub mod ksic;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

pub use classifier::{connect_dart_client, save_results, CorpCodeSource, IndustryClassifier};

// KSIC 재내보내기
pub use ksic::{get_top_industry, KsicClassification, KsicInfo, KsicMapper, KsicTable};

// DART Provider 재내보내기
pub use provider::{
    CompanyProfile, CorpCodeDirectory, CorpCodeDownloader, CorpCodeMap, DartClient, DartError,
    DartHttpClient, Throttle,
};

pub use storage::PgCorpCodeDirectory;
