//! 포트폴리오 시스템의 에러 타입.
//!
//! 이 모듈은 시스템 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 포트폴리오 에러.
#[derive(Debug, Error)]
pub enum FolioError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 로그 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 타임스탬프 파싱 에러
    #[error("타임스탬프 에러: {0}")]
    Timestamp(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 리포트 생성 에러
    #[error("리포트 에러: {0}")]
    Report(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 포트폴리오 작업을 위한 Result 타입.
pub type FolioResult<T> = Result<T, FolioError>;

impl FolioError {
    /// 복구 가능한 에러인지 확인합니다.
    ///
    /// 빈 로그나 체크포인트 없음은 에러가 아닌 기본값으로 처리되므로,
    /// 여기서는 설정/입력 계열만 복구 가능으로 분류합니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FolioError::Config(_) | FolioError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_recoverable() {
        let config_err = FolioError::Config("missing tickers".to_string());
        assert!(config_err.is_recoverable());

        let data_err = FolioError::Data("corrupt row".to_string());
        assert!(!data_err.is_recoverable());
    }

    #[test]
    fn test_serde_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FolioError = json_err.into();
        assert!(matches!(err, FolioError::Serialization(_)));
    }
}
