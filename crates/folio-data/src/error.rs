//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 로그 데이터 관련 오류.
///
/// 경계에서의 읽기/파싱 실패는 호출자에게 보고되어 해당 실행을
/// 중단시킵니다. 필드 단위의 결측/비정상 값은 오류가 아니라
/// "없음"으로 처리됩니다 (해당 처리는 [`crate::store`]에서 수행).
#[derive(Debug, Error)]
pub enum DataError {
    /// 로그 파일 읽기 오류
    #[error("Log file error: {0}")]
    Io(String),

    /// CSV 구조 오류 (행 자체를 해석할 수 없음)
    #[error("CSV error: {0}")]
    Csv(String),

    /// 타임스탬프 파싱 오류
    #[error("Invalid timestamp at line {line}: {value}")]
    InvalidTimestamp { line: u64, value: String },

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// 데이터 작업을 위한 Result 타입.
pub type DataResult<T> = Result<T, DataError>;

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}
