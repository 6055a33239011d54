//! KSIC 코드 → 상위 업종 규칙 테이블.
//!
//! 중분류(2자리) 규칙이 기본이고, 한 중분류가 여러 업종으로 나뉘는 경우
//! 세분류(4자리) 규칙으로 덮어씁니다. 조회는 가장 긴 접두사가 이깁니다:
//! 전체 코드 → 앞 4자리 → 앞 2자리.

use kmi_core::{digits_only, TopIndustry};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use TopIndustry::*;

/// KSIC 접두사별 상위 업종 규칙 (11차 개정 중분류 기준).
pub const KSIC_TOP_INDUSTRY_RULES: &[(&str, TopIndustry)] = &[
    // A. 농업, 임업 및 어업
    ("01", Agriculture),
    ("02", Forestry),
    ("03", Fishing),
    // B. 광업
    ("05", CoalMining),
    ("06", MetalMining),
    ("07", CoalMining),
    ("08", CoalMining),
    // C. 제조업
    ("10", Food),
    ("11", Beverages),
    ("12", Tobacco),
    ("13", Textiles),
    ("14", Apparel),
    ("15", LeatherFootwear),
    ("16", WoodPaper),
    ("17", WoodPaper),
    ("18", Printing),
    ("19", PetroleumProducts),
    ("20", Chemicals),
    ("21", BioPharma),
    ("22", RubberPlastics),
    ("23", NonMetallicMinerals),
    ("24", PrimaryMetals),
    ("25", FabricatedMetals),
    ("26", Semiconductors),
    ("2611", Semiconductors),
    ("2612", Semiconductors),
    ("2621", DisplayComponents),
    ("2622", DisplayComponents),
    ("2629", DisplayComponents),
    ("2641", Telecom),
    ("2642", Telecom),
    ("27", Machinery),
    ("2711", Healthcare),
    ("2719", Healthcare),
    ("28", ElectricalEquipment),
    ("2820", SecondaryBattery),
    ("29", Machinery),
    ("30", Automobiles),
    ("31", DefenseAerospace),
    ("32", Other),
    ("33", Other),
    ("34", Machinery),
    // D. 전기, 가스, 증기 및 공기조절 공급업
    ("35", Utilities),
    // E. 수도, 하수 및 폐기물 처리, 원료 재생업
    ("36", WaterSupply),
    ("37", WasteManagement),
    ("38", WasteManagement),
    ("39", Remediation),
    // F. 건설업
    ("41", Construction),
    ("42", SpecialtyConstruction),
    // G. 도매 및 소매업
    ("45", Wholesale),
    ("46", Wholesale),
    ("47", Retail),
    // H. 운수 및 창고업
    ("49", Transportation),
    ("50", Transportation),
    ("51", Airlines),
    ("52", Logistics),
    // I. 숙박 및 음식점업
    ("55", Lodging),
    ("56", Restaurants),
    // J. 정보통신업
    ("58", Publishing),
    ("5821", Software),
    ("5822", Software),
    ("59", Broadcasting),
    ("60", Broadcasting),
    ("61", Telecom),
    ("62", Software),
    ("63", InformationServices),
    // K. 금융 및 보험업
    ("64", Finance),
    ("65", InsurancePension),
    ("66", FinancialSupport),
    // L. 부동산업
    ("68", RealEstate),
    // M. 전문, 과학 및 기술 서비스업
    ("70", ResearchDevelopment),
    ("71", ProfessionalServices),
    ("7131", Advertising),
    ("7139", Advertising),
    ("7140", Advertising),
    ("72", ScientificServices),
    ("73", ScientificServices),
    // N. 사업시설 관리, 사업 지원 및 임대 서비스업
    ("74", BusinessSupport),
    ("75", BusinessSupport),
    ("76", BusinessSupport),
    // O~S
    ("84", PublicAdministration),
    ("85", Education),
    ("86", Healthcare),
    ("87", SocialWelfare),
    ("90", CreativeArts),
    ("9021", LibrariesMuseums),
    ("9022", LibrariesMuseums),
    ("91", ArtsSportsLeisure),
];

static RULES: Lazy<HashMap<&'static str, TopIndustry>> =
    Lazy::new(|| KSIC_TOP_INDUSTRY_RULES.iter().copied().collect());

/// KSIC 코드로 상위 업종을 찾습니다.
///
/// 숫자 이외 문자는 제거한 뒤 전체 코드, 앞 4자리, 앞 2자리 순으로
/// 규칙을 찾고 처음 일치한 업종을 돌려줍니다. 빈 입력이나 `None`,
/// 일치하는 규칙이 없으면 `기타`.
///
/// ```
/// use kmi_core::TopIndustry;
/// use kmi_data::ksic::get_top_industry;
///
/// assert_eq!(get_top_industry("26110"), TopIndustry::Semiconductors);
/// assert_eq!(get_top_industry(None), TopIndustry::Other);
/// ```
pub fn get_top_industry<'a>(ksic_code: impl Into<Option<&'a str>>) -> TopIndustry {
    let Some(raw) = ksic_code.into() else {
        return TopIndustry::Other;
    };
    let digits = digits_only(raw);

    let candidates = [Some(digits.as_str()), digits.get(..4), digits.get(..2)];
    let found = candidates
        .into_iter()
        .flatten()
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| RULES.get(prefix).copied());
    found.unwrap_or(TopIndustry::Other)
}

/// 규칙 테이블 전체 (접두사, 업종).
pub fn rules() -> &'static [(&'static str, TopIndustry)] {
    KSIC_TOP_INDUSTRY_RULES
}
