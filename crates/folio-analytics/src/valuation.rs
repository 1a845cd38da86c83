//! 시간 버킷 평가액 집계.
//!
//! 로그를 시간 버킷으로 묶어 버킷별 총 포트폴리오 평가액 시계열을
//! 만듭니다. 버킷 내에서는 "마지막 non-null 값이 이긴다":
//! - 현금: 버킷 내 마지막 non-null `cash_after`
//! - 종목별 보유량: 버킷 내 마지막 non-null `position_after`
//! - 종목별 가격: 버킷 내 마지막 non-null `close`
//!
//! `cash_after` 관측이 전혀 없는 버킷은 포인트를 만들지 않으므로
//! 결과 시리즈는 희소합니다. 보유량과 가격 중 한쪽이라도 없는 종목은
//! 평가액에 0으로 기여합니다.

use chrono::{DateTime, Utc};
use folio_core::{BucketGranularity, ValuationPoint};
use folio_data::LogStore;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// 버킷 하나에 누적되는 관측값.
#[derive(Debug, Default)]
struct BucketAccum {
    /// 버킷 내 마지막 non-null 현금 잔고
    last_cash: Option<Decimal>,
    /// 종목별 (마지막 보유량, 마지막 종가)
    instruments: BTreeMap<String, (Option<i64>, Option<Decimal>)>,
}

/// 로그를 버킷 단위 평가액 시계열로 집계하는 계산기.
#[derive(Debug, Clone)]
pub struct TimeBucketAggregator {
    granularity: BucketGranularity,
    tickers: Vec<String>,
}

impl TimeBucketAggregator {
    /// 새 집계기를 생성합니다.
    pub fn new(granularity: BucketGranularity, tickers: Vec<String>) -> Self {
        Self {
            granularity,
            tickers,
        }
    }

    /// 로그 전체를 한 번 훑어 평가액 시계열을 만듭니다.
    ///
    /// 결과는 버킷 시작 시각 오름차순이며 타임스탬프가 중복되지
    /// 않습니다.
    pub fn aggregate(&self, store: &LogStore) -> Vec<ValuationPoint> {
        let mut buckets: BTreeMap<DateTime<Utc>, BucketAccum> = BTreeMap::new();

        // 스토어가 이미 시간순이므로 순서대로 덮어쓰면
        // 버킷 내 마지막 non-null 값이 남는다
        for record in store.records() {
            let key = self.granularity.floor(record.timestamp);
            let accum = buckets.entry(key).or_default();

            if let Some(cash) = record.cash_after {
                accum.last_cash = Some(cash);
            }

            if self.tickers.iter().any(|t| t == &record.ticker) {
                let entry = accum
                    .instruments
                    .entry(record.ticker.clone())
                    .or_insert((None, None));
                if let Some(position) = record.position_after {
                    entry.0 = Some(position);
                }
                if let Some(close) = record.close {
                    entry.1 = Some(close);
                }
            }
        }

        let points: Vec<ValuationPoint> = buckets
            .into_iter()
            .filter_map(|(bucket_time, accum)| {
                // 현금 관측이 없는 버킷은 건너뜀 (시리즈는 희소)
                let cash = accum.last_cash?;
                let stock_value: Decimal = accum
                    .instruments
                    .values()
                    .filter_map(|(position, close)| {
                        Some(Decimal::from((*position)?) * (*close)?)
                    })
                    .sum();
                Some(ValuationPoint::new(bucket_time, cash + stock_value))
            })
            .collect();

        debug!(
            granularity = self.granularity.display_name(),
            points = points.len(),
            "Valuation series aggregated"
        );
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use folio_core::{LogRecord, TradeAction};
    use rust_decimal_macros::dec;

    fn tickers() -> Vec<String> {
        vec!["AAPL".to_string(), "MSFT".to_string()]
    }

    fn record(
        ts: DateTime<Utc>,
        ticker: &str,
        close: Option<Decimal>,
        position: Option<i64>,
        cash: Option<Decimal>,
    ) -> LogRecord {
        LogRecord {
            timestamp: ts,
            ticker: ticker.to_string(),
            action: TradeAction::Other,
            quantity: 0,
            close,
            position_after: position,
            cash_after: cash,
        }
    }

    #[test]
    fn test_last_value_in_bucket_wins() {
        let t1 = Utc.with_ymd_and_hms(2024, 3, 15, 9, 10, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 3, 15, 9, 50, 0).unwrap();
        let store = LogStore::from_records(vec![
            record(t1, "AAPL", Some(dec!(150)), Some(10), Some(dec!(5000))),
            record(t2, "AAPL", Some(dec!(152)), Some(10), Some(dec!(5000))),
        ]);

        let aggregator = TimeBucketAggregator::new(BucketGranularity::Hour, tickers());
        let points = aggregator.aggregate(&store);

        assert_eq!(points.len(), 1);
        assert_eq!(
            points[0].bucket_time,
            Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
        );
        // 버킷 내 마지막 종가 152 사용: 5000 + 10 * 152
        assert_eq!(points[0].total_value, dec!(6520));
    }

    #[test]
    fn test_bucket_without_cash_is_skipped() {
        let t1 = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let store = LogStore::from_records(vec![
            record(t1, "AAPL", Some(dec!(150)), None, None),
            record(t2, "AAPL", Some(dec!(151)), Some(10), Some(dec!(5000))),
        ]);

        let aggregator = TimeBucketAggregator::new(BucketGranularity::Hour, tickers());
        let points = aggregator.aggregate(&store);

        // 현금 관측이 없는 9시 버킷은 누락
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].bucket_time, t2);
    }

    #[test]
    fn test_missing_position_or_close_contributes_zero() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let store = LogStore::from_records(vec![
            record(ts, "AAPL", Some(dec!(150)), None, Some(dec!(5000))),
            record(ts, "MSFT", None, Some(10), None),
        ]);

        let aggregator = TimeBucketAggregator::new(BucketGranularity::Hour, tickers());
        let points = aggregator.aggregate(&store);

        // AAPL은 보유량 없음, MSFT는 가격 없음: 둘 다 0 기여
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].total_value, dec!(5000));
    }

    #[test]
    fn test_daily_buckets_merge_hours() {
        let t1 = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 3, 15, 15, 0, 0).unwrap();
        let t3 = Utc.with_ymd_and_hms(2024, 3, 16, 9, 0, 0).unwrap();
        let store = LogStore::from_records(vec![
            record(t1, "AAPL", Some(dec!(150)), Some(10), Some(dec!(5000))),
            record(t2, "AAPL", Some(dec!(155)), Some(10), Some(dec!(5000))),
            record(t3, "AAPL", Some(dec!(160)), Some(10), Some(dec!(5000))),
        ]);

        let aggregator = TimeBucketAggregator::new(BucketGranularity::Day, tickers());
        let points = aggregator.aggregate(&store);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].total_value, dec!(6550)); // 15일 장 마감 종가
        assert_eq!(points[1].total_value, dec!(6600));
    }

    #[test]
    fn test_untracked_ticker_excluded_from_value() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let store = LogStore::from_records(vec![
            record(ts, "AAPL", Some(dec!(150)), Some(10), Some(dec!(5000))),
            record(ts, "TSLA", Some(dec!(200)), Some(99), None),
        ]);

        let aggregator = TimeBucketAggregator::new(BucketGranularity::Hour, tickers());
        let points = aggregator.aggregate(&store);

        assert_eq!(points[0].total_value, dec!(6500));
    }

    #[test]
    fn test_empty_log_yields_empty_series() {
        let aggregator = TimeBucketAggregator::new(BucketGranularity::Hour, tickers());
        assert!(aggregator.aggregate(&LogStore::default()).is_empty());
    }

    #[test]
    fn test_points_sorted_and_unique() {
        let mut records = Vec::new();
        for hour in [14, 9, 11, 9] {
            let ts = Utc.with_ymd_and_hms(2024, 3, 15, hour, 30, 0).unwrap();
            records.push(record(ts, "AAPL", Some(dec!(150)), Some(1), Some(dec!(100))));
        }
        let store = LogStore::from_records(records);

        let aggregator = TimeBucketAggregator::new(BucketGranularity::Hour, tickers());
        let points = aggregator.aggregate(&store);

        assert_eq!(points.len(), 3);
        assert!(points.windows(2).all(|w| w[0].bucket_time < w[1].bucket_time));
    }
}
