//! DART 기업코드표 (종목코드 → 기업코드).
//!
//! DART는 전체 기업 목록을 `corpCode.xml` 엔드포인트에서 ZIP으로 제공합니다.
//! 압축을 풀면 다음 형식의 `CORPCODE.xml`이 나옵니다.
//!
//! ```xml
//! <result>
//!   <list>
//!     <corp_code>00126380</corp_code>
//!     <corp_name>삼성전자</corp_name>
//!     <stock_code>005930</stock_code>
//!     <modify_date>20231201</modify_date>
//!   </list>
//! </result>
//! ```
//!
//! 비상장 기업은 `stock_code`가 공백이므로 건너뜁니다.

use super::dart::DartHttpClient;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use kmi_core::CorpRecord;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// ZIP 로컬 파일 헤더 시그니처.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// 종목코드로 기업코드를 찾는 저장소.
#[async_trait]
pub trait CorpCodeDirectory: Send + Sync {
    /// 저장소 이름 (로그용).
    fn name(&self) -> &str;

    /// 6자리 종목코드로 조회.
    async fn find_by_stock_code(&self, stock_code: &str) -> Result<Option<CorpRecord>>;

    /// 회사명 부분 일치 검색.
    async fn search_by_name(&self, pattern: &str, limit: usize) -> Result<Vec<CorpRecord>>;
}

/// 메모리에 올린 기업코드표.
#[derive(Debug, Clone, Default)]
pub struct CorpCodeMap {
    by_stock_code: HashMap<String, CorpRecord>,
}

impl CorpCodeMap {
    /// 레코드 목록으로 생성. 종목코드가 겹치면 뒤의 레코드가 남습니다.
    pub fn from_records(records: impl IntoIterator<Item = CorpRecord>) -> Self {
        let by_stock_code = records
            .into_iter()
            .filter(|r| !r.stock_code.trim().is_empty())
            .map(|r| (r.stock_code.clone(), r))
            .collect();
        Self { by_stock_code }
    }

    /// `CORPCODE.xml` 파일 로드.
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "XML 파싱 시작");
        let xml = std::fs::read_to_string(path)?;
        let map = Self::parse_xml(&xml)?;
        info!(count = map.len(), "상장 기업 매핑 완료");
        Ok(map)
    }

    /// `CORPCODE.xml` 문자열 파싱.
    pub fn parse_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut current: Option<CorpRecord> = None;
        let mut field: Option<String> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if name == "list" {
                        current = Some(CorpRecord::default());
                    } else {
                        field = Some(name);
                    }
                }
                Event::Text(t) => {
                    let text = t
                        .unescape()
                        .map_err(|e| DataError::XmlError(e.to_string()))?;
                    if let (Some(record), Some(field)) = (current.as_mut(), field.as_deref()) {
                        set_field(record, field, text.trim());
                    }
                }
                Event::CData(t) => {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    if let (Some(record), Some(field)) = (current.as_mut(), field.as_deref()) {
                        set_field(record, field, text.trim());
                    }
                }
                Event::End(e) => {
                    if e.name().as_ref() == b"list" {
                        if let Some(record) = current.take() {
                            records.push(record);
                        }
                    }
                    field = None;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        debug!(total = records.len(), "기업코드 XML 파싱");
        Ok(Self::from_records(records))
    }

    /// 상장 기업 수.
    pub fn len(&self) -> usize {
        self.by_stock_code.len()
    }

    /// 비어 있는지.
    pub fn is_empty(&self) -> bool {
        self.by_stock_code.is_empty()
    }

    /// 종목코드로 조회.
    pub fn get(&self, stock_code: &str) -> Option<&CorpRecord> {
        self.by_stock_code.get(stock_code)
    }
}

fn set_field(record: &mut CorpRecord, field: &str, value: &str) {
    match field {
        "corp_code" => record.corp_code = value.to_string(),
        "corp_name" => record.corp_name = value.to_string(),
        "stock_code" => record.stock_code = value.to_string(),
        "modify_date" => record.modify_date = value.to_string(),
        _ => {}
    }
}

#[async_trait]
impl CorpCodeDirectory for CorpCodeMap {
    fn name(&self) -> &str {
        "corpCode.xml"
    }

    async fn find_by_stock_code(&self, stock_code: &str) -> Result<Option<CorpRecord>> {
        Ok(self.get(stock_code).cloned())
    }

    async fn search_by_name(&self, pattern: &str, limit: usize) -> Result<Vec<CorpRecord>> {
        let needle = pattern.to_lowercase();
        let mut matches: Vec<CorpRecord> = self
            .by_stock_code
            .values()
            .filter(|r| r.corp_name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.corp_name.cmp(&b.corp_name).then(a.stock_code.cmp(&b.stock_code)));
        matches.truncate(limit);
        Ok(matches)
    }
}

/// `corpCode.zip` 다운로드 및 압축 해제.
pub struct CorpCodeDownloader<'a> {
    http: &'a DartHttpClient,
}

impl<'a> CorpCodeDownloader<'a> {
    /// 새 다운로더 생성.
    pub fn new(http: &'a DartHttpClient) -> Self {
        Self { http }
    }

    /// `CORPCODE.xml` 경로를 돌려줍니다.
    ///
    /// 캐시된 XML이 `corp_code_cache_hours`보다 새것이면 그대로 쓰고,
    /// 아니면(또는 `force_refresh`이면) 새로 내려받습니다.
    pub async fn download(&self, force_refresh: bool) -> Result<PathBuf> {
        let config = self.http.config();
        let xml_path = config.corp_code_xml_path();

        if !force_refresh && is_fresh(&xml_path, config.corp_code_max_age()) {
            info!(path = %xml_path.display(), "기존 파일 사용");
            return Ok(xml_path);
        }

        info!("corpCode.zip 다운로드 시작");
        let bytes = self
            .http
            .get(&config.corp_code_url(), &[])
            .await?
            .bytes()
            .await?;

        // 인증키 오류 등은 200 응답에 에러 본문으로 옵니다
        if !bytes.starts_with(ZIP_MAGIC) {
            let preview: String = String::from_utf8_lossy(&bytes).chars().take(200).collect();
            return Err(DataError::ArchiveError(format!(
                "ZIP 파일이 아닌 응답: {}",
                preview
            )));
        }

        let zip_path = config.corp_code_zip_path();
        if let Some(parent) = zip_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&zip_path, &bytes).await?;
        info!(path = %zip_path.display(), size = bytes.len(), "ZIP 파일 저장");

        extract_xml(&bytes, &xml_path)?;
        info!(path = %xml_path.display(), "XML 파일 추출 완료");

        Ok(xml_path)
    }
}

/// 캐시 파일이 존재하고 `max_age` 이내에 수정되었는지.
fn is_fresh(path: &Path, max_age: Duration) -> bool {
    let Ok(modified) = std::fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };
    match modified.elapsed() {
        Ok(age) => age <= max_age,
        // 수정 시각이 미래
        Err(_) => true,
    }
}

/// ZIP 안의 첫 번째 `.xml` 항목을 `target`으로 풀어 씁니다.
fn extract_xml(bytes: &[u8], target: &Path) -> Result<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(name) = entry.enclosed_name() else {
            continue;
        };
        let is_xml = name
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if !is_xml {
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(target)?;
        std::io::copy(&mut entry, &mut out)?;
        return Ok(());
    }

    Err(DataError::ArchiveError(
        "ZIP 안에 XML 파일이 없습니다".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
    <list>
        <corp_code>00126380</corp_code>
        <corp_name>삼성전자</corp_name>
        <stock_code>005930</stock_code>
        <modify_date>20231201</modify_date>
    </list>
    <list>
        <corp_code>00434003</corp_code>
        <corp_name>다코</corp_name>
        <stock_code> </stock_code>
        <modify_date>20170630</modify_date>
    </list>
    <list>
        <corp_code>00164779</corp_code>
        <corp_name>에스케이하이닉스</corp_name>
        <stock_code>000660</stock_code>
        <modify_date>20240102</modify_date>
    </list>
    <list>
        <corp_code>00126371</corp_code>
        <corp_name>삼성전기</corp_name>
        <stock_code>009150</stock_code>
        <modify_date>20231115</modify_date>
    </list>
</result>"#;

    #[test]
    fn test_parse_skips_unlisted() {
        let map = CorpCodeMap::parse_xml(SAMPLE_XML).unwrap();
        assert_eq!(map.len(), 3);

        let samsung = map.get("005930").unwrap();
        assert_eq!(samsung.corp_code, "00126380");
        assert_eq!(samsung.corp_name, "삼성전자");
        assert_eq!(samsung.modify_date, "20231201");
        assert!(map.get("").is_none());
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let xml = "<result><list><corp_code>00000001</corp_code>\
                   <corp_name>A&amp;B</corp_name><stock_code>123456</stock_code>\
                   <modify_date>20240101</modify_date></list></result>";
        let map = CorpCodeMap::parse_xml(xml).unwrap();
        assert_eq!(map.get("123456").unwrap().corp_name, "A&B");
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        let xml = "<result><list><corp_code>1</corp_name></list></result>";
        assert!(CorpCodeMap::parse_xml(xml).is_err());
    }

    #[tokio::test]
    async fn test_directory_lookup_and_search() {
        let map = CorpCodeMap::parse_xml(SAMPLE_XML).unwrap();

        let found = map.find_by_stock_code("000660").await.unwrap();
        assert_eq!(found.unwrap().corp_code, "00164779");
        assert!(map.find_by_stock_code("999999").await.unwrap().is_none());

        let results = map.search_by_name("삼성", 10).await.unwrap();
        let names: Vec<_> = results.iter().map(|r| r.corp_name.as_str()).collect();
        assert_eq!(names, vec!["삼성전기", "삼성전자"]);

        assert_eq!(map.search_by_name("삼성", 1).await.unwrap().len(), 1);
        assert!(map.search_by_name("없는회사", 10).await.unwrap().is_empty());
    }

    #[test]
    fn test_extract_xml_from_zip() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            writer.start_file("CORPCODE.xml", options).unwrap();
            writer.write_all(SAMPLE_XML.as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let target = dir.path().join("dart").join("CORPCODE.xml");
        extract_xml(buffer.get_ref(), &target).unwrap();

        let map = CorpCodeMap::load(&target).unwrap();
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_extract_without_xml_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            writer.start_file("readme.txt", options).unwrap();
            writer.write_all(b"nothing here").unwrap();
            writer.finish().unwrap();
        }

        let result = extract_xml(buffer.get_ref(), &dir.path().join("CORPCODE.xml"));
        assert!(matches!(result, Err(DataError::ArchiveError(_))));
    }

    #[test]
    fn test_freshness() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CORPCODE.xml");
        assert!(!is_fresh(&path, Duration::from_secs(3600)));

        std::fs::write(&path, SAMPLE_XML).unwrap();
        assert!(is_fresh(&path, Duration::from_secs(3600)));
    }
}
