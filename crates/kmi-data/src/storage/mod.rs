//! 데이터베이스 저장소.

pub mod corp_codes;

pub use corp_codes::PgCorpCodeDirectory;
