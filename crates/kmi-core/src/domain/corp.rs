//! DART 기업코드 레코드.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 종목코드 → DART 기업코드 매핑 레코드.
///
/// `stock_code`가 조회 키이고 `corp_code`는 DART 내부 식별자입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct CorpRecord {
    /// DART 기업코드 (8자리)
    pub corp_code: String,
    /// 회사명
    pub corp_name: String,
    /// 종목코드 (6자리)
    pub stock_code: String,
    /// 최종 변경일자 (YYYYMMDD)
    pub modify_date: String,
}

impl CorpRecord {
    /// 최종 변경일자를 날짜로 변환. 형식이 다르면 `None`.
    pub fn modified_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.modify_date.trim(), "%Y%m%d").ok()
    }
}

/// 종목의 DART 업종 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIndustry {
    /// 종목코드 (6자리)
    pub stock_code: String,
    /// DART 기업코드
    pub corp_code: String,
    /// 회사명
    pub corp_name: String,
    /// 업종코드 (KSIC, 원본 그대로)
    pub induty_code: String,
    /// 업종명 (DART 응답에 없으면 빈 문자열)
    pub induty_name: String,
}

/// 종목코드 정규화.
///
/// 앞의 시장 구분 문자(예: `A005930`의 `A`)를 제거하고 6자리로 0을 채웁니다.
pub fn normalize_stock_code(stock_code: &str) -> String {
    let trimmed = stock_code.trim();
    let code = match trimmed.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => &trimmed[first.len_utf8()..],
        _ => trimmed,
    };
    format!("{:0>6}", code)
}
