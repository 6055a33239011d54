//! # KMI Core
//!
//! K-Market Insight 업종 분류 파이프라인의 핵심 도메인 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - KSIC(한국표준산업분류) 코드 타입
//! - DART 기업코드 레코드 및 업종 조회 결과
//! - 상위 업종 라벨과 분류 결과 DTO
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
