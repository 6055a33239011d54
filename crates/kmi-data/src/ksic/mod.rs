//! KSIC(한국표준산업분류) 매핑.
//!
//! - `rule_table`: KSIC 접두사 → 상위 업종 규칙
//! - `mapper`: 외부 코드표(xlsx/csv)로 산업명을 붙이고 규칙 테이블과 조합

pub mod mapper;
pub mod rule_table;

pub use mapper::{
    build_ksic_map, load_ksic_data, normalize_headers, KsicClassification, KsicInfo, KsicMapper,
    KsicTable,
};
pub use rule_table::{get_top_industry, rules, KSIC_TOP_INDUSTRY_RULES};
