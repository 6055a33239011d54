//! KSIC 코드표 로더 및 매퍼.
//!
//! 통계청 KSIC 코드표(엑셀 또는 CSV)를 읽어 코드 → 산업명 사전을 만들고,
//! 규칙 테이블과 조합해 분류 결과를 만듭니다. 코드표가 없어도 동작하며
//! 이 경우 산업명만 비어 있습니다.

use super::rule_table::get_top_industry;
use calamine::{open_workbook_auto, Reader};
use kmi_core::{digits_only, middle_class_of, TopIndustry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::error::{DataError, Result};

/// KSIC 코드표 다운로드 안내.
const KSIC_DOWNLOAD_GUIDE: &str = "https://kssc.kostat.go.kr:8443/ksscNew_web/index.jsp";

/// 정규화된 코드 컬럼 이름.
pub const CODE_COLUMN: &str = "ksic_code";
/// 정규화된 산업명 컬럼 이름.
pub const NAME_COLUMN: &str = "ksic_name";

/// 스프레드시트에서 읽은 원시 표.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KsicTable {
    /// 컬럼 헤더 (정규화 후)
    pub headers: Vec<String>,
    /// 데이터 행
    pub rows: Vec<Vec<String>>,
}

impl KsicTable {
    /// 헤더와 행으로 표를 만들고 헤더를 정규화합니다.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: normalize_headers(headers),
            rows,
        }
    }

    /// 행이 없는지.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 행 수.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// KSIC 코드 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KsicInfo {
    /// 숫자 코드
    pub ksic_code: String,
    /// 산업명
    pub ksic_name: String,
    /// 중분류 (앞 2자리, 없으면 빈 문자열)
    pub middle_class: String,
}

/// `classify_industry` 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KsicClassification {
    /// KSIC 코드
    pub ksic_code: String,
    /// 산업명 (코드표에 없으면 빈 문자열)
    pub ksic_name: String,
    /// 중분류
    pub middle_class: String,
    /// 상위 업종
    pub top_industry: TopIndustry,
}

/// 헤더를 다듬고 코드/산업명 컬럼을 표준 이름으로 바꿉니다.
///
/// 코드 컬럼은 `코드`/`CODE`를 포함하는 헤더 중 `분류코드`나 `KSIC`가 들어간
/// 것을 우선하고, 산업명 컬럼은 `분류명`/`NAME`/`명`이 들어간 첫 헤더입니다.
pub fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut headers: Vec<String> = headers
        .into_iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let is_code = |h: &str| {
        let upper = h.to_uppercase();
        h.contains("코드") || upper.contains("CODE")
    };
    let code_idx = headers
        .iter()
        .position(|h| is_code(h) && (h.contains("분류코드") || h.to_uppercase().contains("KSIC")))
        .or_else(|| headers.iter().position(|h| is_code(h)));

    let name_idx = headers.iter().enumerate().position(|(i, h)| {
        Some(i) != code_idx
            && (h.contains("분류명") || h.to_uppercase().contains("NAME") || h.contains('명'))
    });

    if let Some(i) = code_idx {
        headers[i] = CODE_COLUMN.to_string();
    }
    if let Some(i) = name_idx {
        headers[i] = NAME_COLUMN.to_string();
    }
    headers
}

/// KSIC 코드표를 읽습니다.
///
/// 파일이 없으면 경고 후 빈 표, 읽기에 실패하면 에러 로그 후 빈 표를
/// 돌려줍니다. 이 함수는 실패하지 않습니다.
pub fn load_ksic_data(path: &Path, sheet_name: Option<&str>) -> KsicTable {
    if !path.exists() {
        warn!(
            path = %path.display(),
            guide = KSIC_DOWNLOAD_GUIDE,
            "KSIC 코드표 파일이 없습니다. 산업명 없이 규칙 테이블만 사용합니다"
        );
        return KsicTable::default();
    }

    info!(path = %path.display(), "KSIC 데이터 로드");

    let loaded = if is_csv(path) {
        read_csv(path)
    } else {
        read_workbook(path, sheet_name)
    };

    match loaded {
        Ok(table) => {
            info!(rows = table.len(), "KSIC 데이터 로드 완료");
            table
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "KSIC 데이터 로드 실패");
            KsicTable::default()
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_csv(path: &Path) -> Result<KsicTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(e) => debug!(line = line + 2, error = %e, "잘못된 CSV 행 건너뜀"),
        }
    }

    Ok(KsicTable::new(headers, rows))
}

fn read_workbook(path: &Path, sheet_name: Option<&str>) -> Result<KsicTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match sheet_name {
        Some(name) => workbook.worksheet_range(name)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DataError::SpreadsheetError("시트가 없습니다".to_string()))??,
    };

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();

    Ok(KsicTable::new(headers, rows.collect()))
}

/// 코드표를 코드 → 정보 사전으로 변환합니다.
///
/// 코드가 비었거나 `nan`인 행, 숫자가 없는 행은 건너뜁니다.
pub fn build_ksic_map(table: &KsicTable) -> HashMap<String, KsicInfo> {
    let Some(code_col) = table.column(CODE_COLUMN) else {
        if !table.is_empty() {
            warn!(headers = ?table.headers, "KSIC 코드 컬럼을 찾지 못했습니다");
        }
        return HashMap::new();
    };
    let name_col = table.column(NAME_COLUMN);

    let mut map = HashMap::new();
    for row in &table.rows {
        let raw_code = row.get(code_col).map(|c| c.trim()).unwrap_or_default();
        if raw_code.is_empty() || raw_code.eq_ignore_ascii_case("nan") {
            continue;
        }
        let code = digits_only(raw_code);
        if code.is_empty() {
            continue;
        }

        let name = name_col
            .and_then(|i| row.get(i))
            .map(|n| n.trim().to_string())
            .unwrap_or_default();

        map.insert(
            code.clone(),
            KsicInfo {
                middle_class: middle_class_of(&code),
                ksic_code: code,
                ksic_name: name,
            },
        );
    }

    map
}

/// KSIC 매퍼.
///
/// 생성 시점에 코드표를 읽어 사전을 만들고 이후에는 읽기만 합니다.
#[derive(Debug, Clone, Default)]
pub struct KsicMapper {
    source: Option<PathBuf>,
    ksic_map: HashMap<String, KsicInfo>,
}

impl KsicMapper {
    /// 코드표 파일로 매퍼를 만듭니다. 파일이 없거나 깨져 있으면 빈 사전.
    pub fn new(path: impl Into<PathBuf>, sheet_name: Option<&str>) -> Self {
        let path = path.into();
        let table = load_ksic_data(&path, sheet_name);
        let ksic_map = build_ksic_map(&table);
        info!(count = ksic_map.len(), "KSIC 매핑 생성 완료");

        Self {
            source: Some(path),
            ksic_map,
        }
    }

    /// 코드표 없이 규칙 테이블만 쓰는 매퍼.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 이미 읽은 표로 매퍼를 만듭니다.
    pub fn from_table(table: &KsicTable) -> Self {
        Self {
            source: None,
            ksic_map: build_ksic_map(table),
        }
    }

    /// 코드표 경로.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 등록된 코드 수.
    pub fn len(&self) -> usize {
        self.ksic_map.len()
    }

    /// 사전이 비었는지.
    pub fn is_empty(&self) -> bool {
        self.ksic_map.is_empty()
    }

    /// KSIC 코드 정보 조회 (`C26110`처럼 문자가 섞여도 됨).
    pub fn get_ksic_info(&self, ksic_code: &str) -> Option<&KsicInfo> {
        self.ksic_map.get(&digits_only(ksic_code))
    }

    /// 중분류 (앞 2자리).
    pub fn get_middle_class(&self, ksic_code: &str) -> String {
        middle_class_of(ksic_code)
    }

    /// KSIC 코드를 분류합니다. 사전에 없어도 중분류와 상위 업종은 채웁니다.
    pub fn classify_industry(&self, ksic_code: &str) -> KsicClassification {
        let top_industry = get_top_industry(ksic_code);

        match self.get_ksic_info(ksic_code) {
            Some(info) => KsicClassification {
                ksic_code: info.ksic_code.clone(),
                ksic_name: info.ksic_name.clone(),
                middle_class: info.middle_class.clone(),
                top_industry,
            },
            None => KsicClassification {
                ksic_code: ksic_code.to_string(),
                ksic_name: String::new(),
                middle_class: self.get_middle_class(ksic_code),
                top_industry,
            },
        }
    }
}
