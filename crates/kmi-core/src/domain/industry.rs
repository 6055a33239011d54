//! 상위 업종 라벨.
//!
//! KSIC 코드가 최종적으로 매핑되는 큐레이션된 업종 목록입니다.
//! 직렬화 시 한글 라벨(예: `"반도체와 반도체장비"`)을 그대로 사용합니다.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! top_industries {
    ($( $(#[$meta:meta])* $variant:ident => $label:literal, $group:literal; )+) => {
        /// 상위 업종.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TopIndustry {
            $( $(#[$meta])* $variant, )+
        }

        impl TopIndustry {
            /// 모든 업종 (선언 순서).
            pub const ALL: &'static [TopIndustry] = &[ $( TopIndustry::$variant, )+ ];

            /// 한글 라벨.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( TopIndustry::$variant => $label, )+
                }
            }

            /// GICS 기반 영문 섹터 그룹.
            pub fn sector_group_en(&self) -> &'static str {
                match self {
                    $( TopIndustry::$variant => $group, )+
                }
            }
        }

        impl FromStr for TopIndustry {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $label => Ok(TopIndustry::$variant), )+
                    other => Err(format!("알 수 없는 업종 라벨: {}", other)),
                }
            }
        }
    };
}

top_industries! {
    // Technology
    Semiconductors => "반도체와 반도체장비", "Semiconductors, IT & Displays";
    DisplayComponents => "디스플레이·전자부품", "Semiconductors, IT & Displays";
    Software => "IT·소프트웨어", "Semiconductors, IT & Displays";
    InformationServices => "정보서비스", "Semiconductors, IT & Displays";
    // Mobility
    Automobiles => "자동차", "Automobiles, Aerospace & Logistics";
    DefenseAerospace => "방산·항공", "Automobiles, Aerospace & Logistics";
    Airlines => "항공", "Automobiles, Aerospace & Logistics";
    Transportation => "운송", "Automobiles, Aerospace & Logistics";
    Logistics => "창고·물류", "Automobiles, Aerospace & Logistics";
    WarehouseTransport => "창고·운송", "Automobiles, Aerospace & Logistics";
    // Healthcare
    BioPharma => "바이오·제약", "Healthcare & Biotech";
    ScientificServices => "전문·과학·기술서비스", "Healthcare & Biotech";
    ResearchDevelopment => "연구개발", "Healthcare & Biotech";
    Healthcare => "보건·의료", "Healthcare & Biotech";
    // Finance
    Finance => "금융", "Financial Services";
    FinancialSupport => "금융지원서비스", "Financial Services";
    InsurancePension => "보험·연금", "Financial Services";
    ProfessionalServices => "전문서비스", "Financial Services";
    // Materials
    Chemicals => "화학", "Materials & Chemicals";
    SecondaryBattery => "2차전지·소재", "Materials & Chemicals";
    RubberPlastics => "고무·플라스틱", "Materials & Chemicals";
    FabricatedMetals => "금속가공", "Materials & Chemicals";
    NonMetallicMinerals => "비금속광물", "Materials & Chemicals";
    PrimaryMetals => "1차금속", "Materials & Chemicals";
    PetroleumProducts => "석유·화학제품", "Materials & Chemicals";
    Textiles => "섬유", "Materials & Chemicals";
    // Media
    Publishing => "출판·미디어", "Media & Entertainment";
    Broadcasting => "영상·방송", "Media & Entertainment";
    TelecomBroadcasting => "통신·방송", "Media & Entertainment";
    CreativeArts => "창작·예술", "Media & Entertainment";
    Advertising => "광고·시장조사", "Media & Entertainment";
    Printing => "출판·인쇄", "Media & Entertainment";
    Telecom => "통신", "Media & Entertainment";
    // Consumer
    Food => "식품", "Consumer Goods & Retail";
    Beverages => "음료", "Consumer Goods & Retail";
    Wholesale => "도매", "Consumer Goods & Retail";
    Retail => "소매", "Consumer Goods & Retail";
    Apparel => "의복·패션", "Consumer Goods & Retail";
    LeatherFootwear => "가죽·신발", "Consumer Goods & Retail";
    Tobacco => "담배", "Consumer Goods & Retail";
    Lodging => "숙박", "Consumer Goods & Retail";
    Restaurants => "음식점", "Consumer Goods & Retail";
    // Infrastructure
    Construction => "건설", "Infrastructure & Energy";
    SpecialtyConstruction => "전문건설", "Infrastructure & Energy";
    CivilEngineering => "토목", "Infrastructure & Energy";
    ElectricalEquipment => "전기장비", "Infrastructure & Energy";
    Utilities => "전기·가스", "Infrastructure & Energy";
    WaterSupply => "수도", "Infrastructure & Energy";
    WasteManagement => "하수·폐기물", "Infrastructure & Energy";
    Remediation => "환경정화", "Infrastructure & Energy";
    EnvironmentalRestoration => "환경·복원", "Infrastructure & Energy";
    // Industrial
    Machinery => "기계·설비", "Industrial Machinery";
    WoodPaper => "목재·종이", "Industrial Machinery";
    // Business
    BusinessSupport => "사업지원서비스", "Business & Services";
    RealEstate => "부동산", "Business & Services";
    SocialWelfare => "사회복지", "Business & Services";
    // Education & agriculture
    Agriculture => "농업", "Education & Agriculture";
    Fishing => "어업", "Education & Agriculture";
    Forestry => "임업", "Education & Agriculture";
    Education => "교육", "Education & Agriculture";
    LibrariesMuseums => "도서관·박물관", "Education & Agriculture";
    // Mining
    CoalMining => "석탄·광업", "Mining & Resources";
    CrudeOilGas => "원유·가스", "Mining & Resources";
    MetalMining => "금속광업", "Mining & Resources";
    // Others
    PublicAdministration => "공공행정", "Public Administration";
    ArtsSportsLeisure => "예술·스포츠·여가", "Arts, Sports & Leisure";
    /// 규칙 테이블에 없는 코드
    Other => "기타", "Others";
    /// DART 조회 실패
    Unclassified => "미분류", "Unclassified";
    /// 분류 중 예상치 못한 오류
    Error => "오류", "Unclassified";
}

impl TopIndustry {
    /// 분류 실패를 나타내는 라벨인지 (`미분류`, `오류`).
    pub fn is_sentinel(&self) -> bool {
        matches!(self, TopIndustry::Unclassified | TopIndustry::Error)
    }
}

impl Default for TopIndustry {
    fn default() -> Self {
        TopIndustry::Unclassified
    }
}

impl fmt::Display for TopIndustry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TopIndustry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TopIndustry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// 한글 업종 라벨의 영문 섹터 그룹. 모르는 라벨이면 `"Others"`.
pub fn sector_group_en(label: &str) -> &'static str {
    label
        .parse::<TopIndustry>()
        .map(|industry| industry.sector_group_en())
        .unwrap_or("Others")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_are_unique_and_parse_back() {
        let mut seen = HashSet::new();
        for industry in TopIndustry::ALL {
            assert!(seen.insert(industry.as_str()), "중복 라벨: {}", industry);
            assert_eq!(industry.as_str().parse::<TopIndustry>().unwrap(), *industry);
        }
    }

    #[test]
    fn test_serialize_as_korean_label() {
        let json = serde_json::to_string(&TopIndustry::Semiconductors).unwrap();
        assert_eq!(json, "\"반도체와 반도체장비\"");

        let parsed: TopIndustry = serde_json::from_str("\"바이오·제약\"").unwrap();
        assert_eq!(parsed, TopIndustry::BioPharma);
        assert!(serde_json::from_str::<TopIndustry>("\"우주\"").is_err());
    }

    #[test]
    fn test_sector_group_en() {
        assert_eq!(sector_group_en("반도체와 반도체장비"), "Semiconductors, IT & Displays");
        assert_eq!(sector_group_en("미분류"), "Unclassified");
        assert_eq!(sector_group_en("기타"), "Others");
        assert_eq!(sector_group_en("KOSPI"), "Others");
    }

    #[test]
    fn test_sector_group_en_covers_legacy_sector_labels() {
        let table = [
            ("반도체와 반도체장비", "Semiconductors, IT & Displays"),
            ("디스플레이·전자부품", "Semiconductors, IT & Displays"),
            ("IT·소프트웨어", "Semiconductors, IT & Displays"),
            ("정보서비스", "Semiconductors, IT & Displays"),
            ("자동차", "Automobiles, Aerospace & Logistics"),
            ("방산·항공", "Automobiles, Aerospace & Logistics"),
            ("항공", "Automobiles, Aerospace & Logistics"),
            ("운송", "Automobiles, Aerospace & Logistics"),
            ("창고·물류", "Automobiles, Aerospace & Logistics"),
            ("창고·운송", "Automobiles, Aerospace & Logistics"),
            ("바이오·제약", "Healthcare & Biotech"),
            ("전문·과학·기술서비스", "Healthcare & Biotech"),
            ("연구개발", "Healthcare & Biotech"),
            ("보건·의료", "Healthcare & Biotech"),
            ("금융", "Financial Services"),
            ("금융지원서비스", "Financial Services"),
            ("보험·연금", "Financial Services"),
            ("전문서비스", "Financial Services"),
            ("화학", "Materials & Chemicals"),
            ("2차전지·소재", "Materials & Chemicals"),
            ("고무·플라스틱", "Materials & Chemicals"),
            ("금속가공", "Materials & Chemicals"),
            ("비금속광물", "Materials & Chemicals"),
            ("1차금속", "Materials & Chemicals"),
            ("석유·화학제품", "Materials & Chemicals"),
            ("섬유", "Materials & Chemicals"),
            ("출판·미디어", "Media & Entertainment"),
            ("영상·방송", "Media & Entertainment"),
            ("통신·방송", "Media & Entertainment"),
            ("창작·예술", "Media & Entertainment"),
            ("광고·시장조사", "Media & Entertainment"),
            ("출판·인쇄", "Media & Entertainment"),
            ("통신", "Media & Entertainment"),
            ("식품", "Consumer Goods & Retail"),
            ("음료", "Consumer Goods & Retail"),
            ("도매", "Consumer Goods & Retail"),
            ("소매", "Consumer Goods & Retail"),
            ("의복·패션", "Consumer Goods & Retail"),
            ("가죽·신발", "Consumer Goods & Retail"),
            ("담배", "Consumer Goods & Retail"),
            ("숙박", "Consumer Goods & Retail"),
            ("음식점", "Consumer Goods & Retail"),
            ("건설", "Infrastructure & Energy"),
            ("토목", "Infrastructure & Energy"),
            ("전기장비", "Infrastructure & Energy"),
            ("전기·가스", "Infrastructure & Energy"),
            ("환경·복원", "Infrastructure & Energy"),
            ("환경정화", "Infrastructure & Energy"),
            ("전문건설", "Infrastructure & Energy"),
            ("하수·폐기물", "Infrastructure & Energy"),
            ("수도", "Infrastructure & Energy"),
            ("기계·설비", "Industrial Machinery"),
            ("목재·종이", "Industrial Machinery"),
            ("사업지원서비스", "Business & Services"),
            ("부동산", "Business & Services"),
            ("사회복지", "Business & Services"),
            ("농업", "Education & Agriculture"),
            ("어업", "Education & Agriculture"),
            ("임업", "Education & Agriculture"),
            ("교육", "Education & Agriculture"),
            ("도서관·박물관", "Education & Agriculture"),
            ("석탄·광업", "Mining & Resources"),
            ("원유·가스", "Mining & Resources"),
            ("금속광업", "Mining & Resources"),
            ("기타", "Others"),
            ("미분류", "Unclassified"),
            ("공공행정", "Public Administration"),
            ("예술·스포츠·여가", "Arts, Sports & Leisure"),
        ];
        for (label, group) in table {
            assert_eq!(sector_group_en(label), group, "{}", label);
        }
        assert_eq!(TopIndustry::ALL.len(), table.len() + 1);
    }

    #[test]
    fn test_sentinels() {
        assert!(TopIndustry::Unclassified.is_sentinel());
        assert!(TopIndustry::Error.is_sentinel());
        assert!(!TopIndustry::Other.is_sentinel());
        assert_eq!(TopIndustry::default(), TopIndustry::Unclassified);
    }
}
