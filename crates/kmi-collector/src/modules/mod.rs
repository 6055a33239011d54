//! 분류 작업 모듈.

pub mod classify;
pub mod corp_codes;

pub use classify::{classify_stocks, parse_stock_codes, read_stock_codes};
pub use corp_codes::{download_corp_codes, search_companies};
