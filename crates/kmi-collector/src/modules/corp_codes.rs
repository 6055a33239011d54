//! DART 기업코드 모듈.

use crate::Result;
use kmi_core::{CorpRecord, DartConfig};
use kmi_data::{CorpCodeDownloader, CorpCodeMap, DartClient, DartHttpClient};
use std::time::Instant;

/// corpCode.zip 다운로드 후 상장 기업 수 반환
pub async fn download_corp_codes(config: &DartConfig, force_refresh: bool) -> Result<usize> {
    let start = Instant::now();
    tracing::info!(force_refresh, "DART 기업코드 다운로드 시작");

    let http = DartHttpClient::new(config.clone())?;
    let xml_path = CorpCodeDownloader::new(&http).download(force_refresh).await?;
    let map = CorpCodeMap::load(&xml_path)?;

    tracing::info!(
        path = %xml_path.display(),
        count = map.len(),
        elapsed = format!("{:.1}s", start.elapsed().as_secs_f64()),
        "DART 기업코드 준비 완료"
    );
    Ok(map.len())
}

/// 기업명으로 검색
pub async fn search_companies(client: &DartClient, pattern: &str, limit: usize) -> Vec<CorpRecord> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        tracing::warn!("검색어가 비어 있습니다");
        return Vec::new();
    }

    let records = client.search_by_name(pattern, limit).await;
    tracing::info!(pattern, count = records.len(), "기업명 검색 완료");
    records
}
