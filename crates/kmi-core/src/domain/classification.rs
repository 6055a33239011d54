//! 업종 분류 결과.

use super::corp::CompanyIndustry;
use super::industry::TopIndustry;
use serde::{Deserialize, Serialize};

/// DART 조회 실패 시 에러 메시지.
pub const DART_LOOKUP_FAILED: &str = "DART 데이터 조회 실패";

/// 종목 하나의 업종 분류 결과.
///
/// 실패해도 항상 채워진 레코드를 돌려줍니다. 실패 시 `success=false`,
/// `error`에 사유가 들어가고 `top_industry`는 `미분류`/`오류` 중 하나입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 종목코드 (호출자가 넘긴 값)
    pub stock_code: String,
    /// DART 기업코드
    pub corp_code: Option<String>,
    /// 회사명
    pub corp_name: Option<String>,
    /// KSIC 코드 (DART induty_code 원본)
    pub ksic_code: Option<String>,
    /// KSIC 산업명
    pub ksic_name: Option<String>,
    /// 중분류 (앞 2자리)
    pub middle_class: Option<String>,
    /// 상위 업종
    pub top_industry: TopIndustry,
    /// 성공 여부
    pub success: bool,
    /// 실패 사유
    pub error: Option<String>,
}

impl ClassificationResult {
    /// 분류 성공 결과.
    pub fn classified(
        stock_code: impl Into<String>,
        industry: &CompanyIndustry,
        ksic_name: String,
        middle_class: String,
        top_industry: TopIndustry,
    ) -> Self {
        Self {
            stock_code: stock_code.into(),
            corp_code: Some(industry.corp_code.clone()),
            corp_name: Some(industry.corp_name.clone()),
            ksic_code: Some(industry.induty_code.clone()),
            ksic_name: Some(ksic_name),
            middle_class: Some(middle_class),
            top_industry,
            success: true,
            error: None,
        }
    }

    /// 종목코드를 찾지 못했거나 DART 조회가 실패한 경우.
    pub fn lookup_failed(stock_code: impl Into<String>) -> Self {
        Self::failed(stock_code, TopIndustry::Unclassified, DART_LOOKUP_FAILED)
    }

    /// 예상치 못한 오류로 분류하지 못한 경우.
    pub fn errored(stock_code: impl Into<String>, error: impl Into<String>) -> Self {
        Self::failed(stock_code, TopIndustry::Error, error)
    }

    fn failed(
        stock_code: impl Into<String>,
        top_industry: TopIndustry,
        error: impl Into<String>,
    ) -> Self {
        Self {
            stock_code: stock_code.into(),
            corp_code: None,
            corp_name: None,
            ksic_code: None,
            ksic_name: None,
            middle_class: None,
            top_industry,
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_failed_shape() {
        let result = ClassificationResult::lookup_failed("000000");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({
                "stock_code": "000000",
                "corp_code": null,
                "corp_name": null,
                "ksic_code": null,
                "ksic_name": null,
                "middle_class": null,
                "top_industry": "미분류",
                "success": false,
                "error": "DART 데이터 조회 실패",
            })
        );
    }

    #[test]
    fn test_errored_uses_error_label() {
        let result = ClassificationResult::errored("005930", "connection reset");
        assert_eq!(result.top_industry, TopIndustry::Error);
        assert_eq!(result.error.as_deref(), Some("connection reset"));
        assert!(!result.success);
    }

    #[test]
    fn test_classified_copies_company_fields() {
        let industry = CompanyIndustry {
            stock_code: "005930".to_string(),
            corp_code: "00126380".to_string(),
            corp_name: "삼성전자".to_string(),
            induty_code: "264".to_string(),
            induty_name: String::new(),
        };
        let result = ClassificationResult::classified(
            "A005930",
            &industry,
            "통신 및 방송 장비 제조업".to_string(),
            "26".to_string(),
            TopIndustry::Semiconductors,
        );

        assert!(result.success);
        assert_eq!(result.stock_code, "A005930");
        assert_eq!(result.corp_code.as_deref(), Some("00126380"));
        assert_eq!(result.ksic_code.as_deref(), Some("264"));
        assert_eq!(result.error, None);
    }
}
