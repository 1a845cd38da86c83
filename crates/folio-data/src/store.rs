//! 정렬된 로그 뷰.
//!
//! CSV 로그를 읽어 타임스탬프 오름차순으로 정렬된 레코드 목록을
//! 만듭니다. 동일 타임스탬프 행들은 원본 삽입 순서를 유지합니다
//! (stable sort). "그룹 내 마지막 non-null 값이 이긴다"는 상위
//! 단계의 규칙은 전적으로 이 정렬 순서에 의존합니다.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use folio_core::{LogRecord, TradeAction};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{DataError, DataResult};

/// CSV 행의 원시 형태.
///
/// 숫자 필드는 일단 문자열로 받은 뒤 개별적으로 파싱합니다.
/// 비어 있거나 비정상적인 값은 행 전체를 버리지 않고 해당 필드만
/// `None`으로 강등합니다.
#[derive(Debug, Deserialize)]
struct RawRecord {
    timestamp: String,
    ticker: String,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    close: Option<String>,
    #[serde(default)]
    position_after: Option<String>,
    #[serde(default)]
    cash_after: Option<String>,
}

/// append-only 로그에 대한 읽기 전용 뷰.
#[derive(Debug, Clone, Default)]
pub struct LogStore {
    records: Vec<LogRecord>,
}

impl LogStore {
    /// CSV 파일에서 로그를 로드합니다.
    ///
    /// 파일이 없거나 행 구조 자체가 깨진 경우는 오류로 보고되어
    /// 해당 실행이 중단됩니다. 빈 로그(헤더만 있는 파일)는 오류가
    /// 아니라 빈 스토어가 됩니다.
    pub fn from_path<P: AsRef<Path>>(path: P) -> DataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path.as_ref())
            .map_err(|e| DataError::Io(e.to_string()))?;

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
            let raw = row?;
            // CSV 라인 번호는 헤더 다음부터 1-base
            let line = idx as u64 + 2;
            records.push(parse_record(raw, line)?);
        }

        debug!(rows = records.len(), "Log file loaded");
        Ok(Self::from_records(records))
    }

    /// 이미 파싱된 레코드에서 스토어를 생성합니다.
    ///
    /// 레코드는 타임스탬프 오름차순으로 정렬되며, 동률은 입력 순서를
    /// 유지합니다.
    pub fn from_records(mut records: Vec<LogRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    /// 정렬된 전체 레코드를 반환합니다.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// 레코드 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 로그가 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 로그에 등장하는 모든 티커를 반환합니다.
    pub fn tickers(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.ticker.clone()).collect()
    }

    /// 특정 종목의 가장 최근 종가를 반환합니다.
    pub fn latest_close(&self, ticker: &str) -> Option<Decimal> {
        self.records
            .iter()
            .rev()
            .filter(|r| r.ticker == ticker)
            .find_map(|r| r.close)
    }

    /// 특정 종목의 (첫 종가, 마지막 종가) 쌍을 반환합니다.
    ///
    /// 종가 관측이 2개 미만이면 `None`입니다.
    pub fn first_last_close(&self, ticker: &str) -> Option<(Decimal, Decimal)> {
        let mut closes = self
            .records
            .iter()
            .filter(|r| r.ticker == ticker)
            .filter_map(|r| r.close);
        let first = closes.next()?;
        let last = closes.last()?;
        Some((first, last))
    }
}

/// 원시 CSV 행을 도메인 레코드로 변환합니다.
///
/// 타임스탬프는 필수이며 파싱 실패 시 경계 오류입니다. 나머지 숫자
/// 필드는 실패해도 `None`(또는 quantity의 경우 0)으로 강등됩니다.
fn parse_record(raw: RawRecord, line: u64) -> DataResult<LogRecord> {
    let timestamp = parse_timestamp(&raw.timestamp).ok_or(DataError::InvalidTimestamp {
        line,
        value: raw.timestamp.clone(),
    })?;

    let action = raw
        .action
        .as_deref()
        .map(TradeAction::parse)
        .unwrap_or(TradeAction::Other);

    let quantity = parse_opt::<i64>(raw.quantity.as_deref()).unwrap_or(0);
    let close = parse_opt::<Decimal>(raw.close.as_deref());
    let position_after = parse_opt::<f64>(raw.position_after.as_deref()).map(|p| p as i64);
    let cash_after = parse_opt::<Decimal>(raw.cash_after.as_deref());

    if close.is_none() && raw.close.as_deref().is_some_and(|s| !s.is_empty()) {
        warn!(line, ticker = %raw.ticker, "Malformed close value, treated as null");
    }

    Ok(LogRecord {
        timestamp,
        ticker: raw.ticker,
        action,
        quantity,
        close,
        position_after,
        cash_after,
    })
}

/// 선택적 숫자 필드를 파싱합니다. 빈 문자열/파싱 실패는 `None`.
fn parse_opt<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value.filter(|s| !s.is_empty()).and_then(|s| s.parse().ok())
}

/// ISO-8601 계열 타임스탬프를 파싱합니다.
///
/// RFC 3339, 오프셋 없는 ISO-8601, 공백 구분 형식, 날짜 단독 형식을
/// 순서대로 시도합니다. 오프셋이 없으면 UTC로 간주합니다.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}
