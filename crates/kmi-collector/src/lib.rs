//! K-Market Insight 업종 분류 CLI.
//!
//! 이 crate는 분류 파이프라인을 명령줄에서 실행하는 바이너리를 제공합니다:
//! - 종목코드 분류 (단건/일괄, JSON 저장)
//! - DART 기업코드표 다운로드
//! - 기업명 검색

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::ClassificationStats;
