//! KSIC(한국표준산업분류) 코드.
//!
//! 대분류 문자(A~U) 뒤에 1~5자리 숫자가 이어지는 계층형 코드입니다.
//! 자릿수가 늘어날수록 세분화됩니다 (중분류 2자리 → 소분류 3자리 →
//! 세분류 4자리 → 세세분류 5자리).

use serde::{Deserialize, Serialize};
use std::fmt;

/// 숫자만 남긴 KSIC 코드.
///
/// `C26110`, `26-110`처럼 들어와도 숫자 부분(`26110`)만 보관합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KsicCode(String);

impl KsicCode {
    /// 원시 문자열에서 숫자만 추출해 코드를 만듭니다. 숫자가 없으면 `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = digits_only(raw);
        if digits.is_empty() {
            None
        } else {
            Some(Self(digits))
        }
    }

    /// 숫자 코드 문자열.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 자릿수.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 항상 false (빈 코드는 만들 수 없음).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 중분류 (앞 2자리). 2자리 미만이면 `None`.
    pub fn middle_class(&self) -> Option<&str> {
        self.prefix(2)
    }

    /// 앞 `len`자리. 코드가 더 짧으면 `None`.
    pub fn prefix(&self, len: usize) -> Option<&str> {
        self.0.get(..len)
    }
}

impl fmt::Display for KsicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for KsicCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("KSIC 코드에 숫자가 없습니다: {:?}", value))
    }
}

impl From<KsicCode> for String {
    fn from(code: KsicCode) -> Self {
        code.0
    }
}

/// 문자열에서 ASCII 숫자만 남깁니다.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 원시 코드의 중분류(앞 2자리 숫자). 2자리 미만이면 빈 문자열.
pub fn middle_class_of(raw: &str) -> String {
    KsicCode::parse(raw)
        .and_then(|code| code.middle_class().map(str::to_string))
        .unwrap_or_default()
}
