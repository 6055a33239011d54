//! `dart_corp_codes` 테이블 기반 기업코드 저장소.
//!
//! 미리 동기화된 테이블에서 조회하므로 corpCode.zip을 내려받을 필요가 없습니다.
//!
//! ```sql
//! CREATE TABLE dart_corp_codes (
//!   stock_code  TEXT PRIMARY KEY,
//!   corp_code   TEXT NOT NULL UNIQUE,
//!   corp_name   TEXT NOT NULL,
//!   modify_date TEXT
//! );
//! ```

use crate::error::{DataError, Result};
use crate::provider::corp_code::CorpCodeDirectory;
use async_trait::async_trait;
use kmi_core::CorpRecord;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Postgres 기업코드 저장소.
#[derive(Clone)]
pub struct PgCorpCodeDirectory {
    pool: PgPool,
}

impl PgCorpCodeDirectory {
    /// 새 연결 풀을 만들어 생성.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        info!("데이터베이스 연결 중...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        info!("데이터베이스 연결 완료");
        Ok(Self { pool })
    }

    /// 저장된 상장 기업 수.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dart_corp_codes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

#[async_trait]
impl CorpCodeDirectory for PgCorpCodeDirectory {
    fn name(&self) -> &str {
        "dart_corp_codes"
    }

    #[instrument(skip(self))]
    async fn find_by_stock_code(&self, stock_code: &str) -> Result<Option<CorpRecord>> {
        let record = sqlx::query_as::<_, CorpRecord>(
            r#"
            SELECT corp_code, corp_name, stock_code, COALESCE(modify_date, '') AS modify_date
            FROM dart_corp_codes
            WHERE stock_code = $1
            "#,
        )
        .bind(stock_code)
        .fetch_optional(&self.pool)
        .await?;

        debug!(found = record.is_some(), "기업코드 조회");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn search_by_name(&self, pattern: &str, limit: usize) -> Result<Vec<CorpRecord>> {
        let records = sqlx::query_as::<_, CorpRecord>(
            r#"
            SELECT corp_code, corp_name, stock_code, COALESCE(modify_date, '') AS modify_date
            FROM dart_corp_codes
            WHERE corp_name ILIKE $1
            ORDER BY corp_name, stock_code
            LIMIT $2
            "#,
        )
        .bind(format!("%{}%", escape_like(pattern)))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "기업명 검색");
        Ok(records)
    }
}

/// `LIKE` 패턴의 와일드카드 문자를 이스케이프합니다.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
