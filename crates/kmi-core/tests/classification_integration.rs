//! 분류 결과 DTO 통합 테스트
//!
//! 종목코드 정규화, KSIC 코드 파싱, 업종 라벨을 조합해 결과 레코드를 만드는 흐름

use kmi_core::{
    normalize_stock_code, sector_group_en, ClassificationResult, CompanyIndustry, KsicCode,
    TopIndustry,
};

fn samsung() -> CompanyIndustry {
    CompanyIndustry {
        stock_code: normalize_stock_code("A005930"),
        corp_code: "00126380".to_string(),
        corp_name: "삼성전자".to_string(),
        induty_code: "C26110".to_string(),
        induty_name: "반도체 제조업".to_string(),
    }
}

#[test]
fn test_classified_result_from_company_industry() {
    let industry = samsung();
    assert_eq!(industry.stock_code, "005930");

    let code = KsicCode::parse(&industry.induty_code).unwrap();
    assert_eq!(code.as_str(), "26110");
    let middle = code.middle_class().unwrap().to_string();

    let result = ClassificationResult::classified(
        "A005930",
        &industry,
        industry.induty_name.clone(),
        middle,
        TopIndustry::Semiconductors,
    );

    assert!(result.success);
    assert_eq!(result.stock_code, "A005930");
    assert_eq!(result.ksic_code.as_deref(), Some("C26110"));
    assert_eq!(result.middle_class.as_deref(), Some("26"));
    assert_eq!(
        sector_group_en(result.top_industry.as_str()),
        "Semiconductors, IT & Displays"
    );
}

#[test]
fn test_results_round_trip_as_json_array() {
    let results = vec![
        ClassificationResult::classified(
            "005930",
            &samsung(),
            "반도체 제조업".to_string(),
            "26".to_string(),
            TopIndustry::Semiconductors,
        ),
        ClassificationResult::lookup_failed("000000"),
        ClassificationResult::errored("111111", "connection refused"),
    ];

    let json = serde_json::to_string_pretty(&results).unwrap();
    assert!(json.contains("\"반도체와 반도체장비\""));
    assert!(json.contains("\"미분류\""));
    assert!(json.contains("\"오류\""));

    let parsed: Vec<ClassificationResult> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, results);
}

#[test]
fn test_every_label_has_english_group() {
    for industry in TopIndustry::ALL {
        assert!(!industry.sector_group_en().is_empty());
        assert_eq!(sector_group_en(industry.as_str()), industry.sector_group_en());
    }
    assert_eq!(sector_group_en("알 수 없음"), "Others");
}
