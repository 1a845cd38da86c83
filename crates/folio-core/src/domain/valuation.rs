//! 평가액 시계열 타입.
//!
//! `ValuationPoint`는 시간 버킷 하나의 총 포트폴리오 평가액입니다.
//! 시리즈는 희소합니다: `cash_after` 관측이 없는 버킷은 포인트를
//! 만들지 않으므로, 소비자는 균일한 간격을 가정하면 안 됩니다.

use chrono::{DateTime, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 시간 버킷 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketGranularity {
    /// 시간별 버킷
    Hour,
    /// 일별 버킷
    Day,
}

impl BucketGranularity {
    /// 문자열에서 버킷 단위를 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hour" | "hourly" | "h" | "1h" => Some(Self::Hour),
            "day" | "daily" | "d" | "1d" => Some(Self::Day),
            _ => None,
        }
    }

    /// 타임스탬프를 버킷 시작 시각으로 내림합니다.
    pub fn floor(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let date = ts.date_naive();
        let floored = match self {
            Self::Hour => date.and_hms_opt(ts.hour(), 0, 0),
            Self::Day => date.and_hms_opt(0, 0, 0),
        };
        // hour는 0-23 범위이므로 항상 유효
        floored.unwrap().and_utc()
    }

    /// 표시용 이름을 반환합니다.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hour => "시간별",
            Self::Day => "일별",
        }
    }
}

/// 시간 버킷 하나의 총 포트폴리오 평가액.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationPoint {
    /// 버킷 시작 시각
    pub bucket_time: DateTime<Utc>,
    /// 총 평가액 (현금 + 보유 종목 평가액)
    pub total_value: Decimal,
}

impl ValuationPoint {
    /// 새 평가액 포인트를 생성합니다.
    pub fn new(bucket_time: DateTime<Utc>, total_value: Decimal) -> Self {
        Self {
            bucket_time,
            total_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_granularity_parse() {
        assert_eq!(BucketGranularity::parse("hour"), Some(BucketGranularity::Hour));
        assert_eq!(BucketGranularity::parse("1H"), Some(BucketGranularity::Hour));
        assert_eq!(BucketGranularity::parse("daily"), Some(BucketGranularity::Day));
        assert_eq!(BucketGranularity::parse("week"), None);
    }

    #[test]
    fn test_floor_hour() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 14, 37, 52).unwrap();
        let floored = BucketGranularity::Hour.floor(ts);
        assert_eq!(floored, Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_floor_day() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 14, 37, 52).unwrap();
        let floored = BucketGranularity::Day.floor(ts);
        assert_eq!(floored, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_floor_idempotent() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 14, 37, 52).unwrap();
        let once = BucketGranularity::Hour.floor(ts);
        assert_eq!(BucketGranularity::Hour.floor(once), once);
    }

    proptest! {
        #[test]
        fn prop_floor_never_exceeds_input(secs in 0i64..4_000_000_000i64) {
            let ts = Utc.timestamp_opt(secs, 0).unwrap();
            for granularity in [BucketGranularity::Hour, BucketGranularity::Day] {
                let floored = granularity.floor(ts);
                prop_assert!(floored <= ts);
                prop_assert_eq!(granularity.floor(floored), floored);
            }
        }
    }
}
