//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP 요청 오류
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 데이터베이스 연결 오류
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// 데이터베이스 쿼리 오류
    #[error("Query error: {0}")]
    QueryError(String),

    /// XML 파싱 오류
    #[error("XML parse error: {0}")]
    XmlError(String),

    /// ZIP 압축 해제 오류
    #[error("Archive error: {0}")]
    ArchiveError(String),

    /// 스프레드시트 읽기 오류
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        DataError::QueryError(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

impl From<quick_xml::Error> for DataError {
    fn from(err: quick_xml::Error) -> Self {
        DataError::XmlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for DataError {
    fn from(err: zip::result::ZipError) -> Self {
        DataError::ArchiveError(err.to_string())
    }
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        DataError::SpreadsheetError(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::SpreadsheetError(err.to_string())
    }
}

impl From<kmi_core::CoreError> for DataError {
    fn from(err: kmi_core::CoreError) -> Self {
        DataError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
