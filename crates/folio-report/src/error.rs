//! 리포트 모듈 오류 타입.

use thiserror::Error;

/// 대시보드 생성 관련 오류.
#[derive(Debug, Error)]
pub enum ReportError {
    /// 출력 파일 쓰기 오류
    #[error("Report output error: {0}")]
    Io(String),

    /// 차트 직렬화 오류
    #[error("Chart serialization error: {0}")]
    Serialization(String),
}

/// 리포트 작업을 위한 Result 타입.
pub type ReportResult<T> = Result<T, ReportError>;

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}
