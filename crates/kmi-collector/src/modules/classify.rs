//! 업종 분류 모듈.

use crate::{ClassificationStats, Result};
use kmi_core::{normalize_stock_code, ClassificationResult};
use kmi_data::IndustryClassifier;
use std::path::Path;
use std::time::Instant;

/// 종목코드 목록 분류 (결과 저장 선택)
pub async fn classify_stocks(
    classifier: &IndustryClassifier,
    stock_codes: &[String],
    save_path: Option<&Path>,
) -> Result<(Vec<ClassificationResult>, ClassificationStats)> {
    let start = Instant::now();

    let results = classifier.batch_classify(stock_codes, save_path).await?;
    let stats = ClassificationStats::from_results(&results, start.elapsed());

    Ok((results, stats))
}

/// 입력 파일에서 종목코드 목록 읽기
///
/// 한 줄에 하나 또는 쉼표로 구분합니다. 빈 줄과 `#` 주석은 무시하고,
/// 정규화한 코드 기준으로 중복을 제거합니다 (처음 나온 순서 유지).
pub async fn read_stock_codes(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await?;
    let codes = parse_stock_codes(&content);
    tracing::info!(path = %path.display(), count = codes.len(), "종목코드 목록 로드");
    Ok(codes)
}

/// 종목코드 목록 텍스트 파싱
pub fn parse_stock_codes(content: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();

    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .filter(|code| seen.insert(normalize_stock_code(code)))
        .map(str::to_string)
        .collect()
}
