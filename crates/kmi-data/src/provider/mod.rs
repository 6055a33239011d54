//! 데이터 Provider 모듈.
//!
//! ## DART Open API
//! - `DartClient`: 종목코드 → 기업코드 → 기업개황(업종코드) 조회
//! - `DartHttpClient`: 인증키, 타임아웃, 요청 간격을 관리하는 HTTP 계층
//!
//! ## 기업코드 저장소
//! - `CorpCodeMap`: DART `CORPCODE.xml` 기반 (다운로드 후 메모리 적재)
//! - `PgCorpCodeDirectory`: `dart_corp_codes` 테이블 기반 (`storage` 모듈)

pub mod corp_code;
pub mod dart;
pub mod throttle;

pub use corp_code::{CorpCodeDirectory, CorpCodeDownloader, CorpCodeMap};
pub use dart::{CompanyProfile, DartClient, DartError, DartHttpClient, DartResult};
pub use throttle::Throttle;
