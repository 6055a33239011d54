//! 핵심 에러 타입.

use thiserror::Error;

/// 설정 및 파일 시스템 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 파일 시스템 에러
    #[error("파일 시스템 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Config("DART_API_KEY".to_string());
        assert_eq!(err.to_string(), "설정 에러: DART_API_KEY");
    }
}
