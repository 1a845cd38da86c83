//! 매수 체결 기록.
//!
//! 로그의 BUY 행에서 파생되는 체결 기록입니다. 매도는 체크포인트 행의
//! 상태 변화로만 반영되며 별도 체결 기록을 만들지 않습니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// BUY 로그 행에서 파생된 체결 기록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// 체결 타임스탬프
    pub timestamp: DateTime<Utc>,
    /// 종목 티커
    pub ticker: String,
    /// 체결 수량
    pub shares: i64,
    /// 체결 가격
    pub price: Decimal,
    /// 총 체결 금액 (수량 × 가격)
    pub total_cost: Decimal,
}

impl Trade {
    /// 새 체결 기록을 생성합니다. 총 금액은 자동 계산됩니다.
    pub fn new(
        timestamp: DateTime<Utc>,
        ticker: impl Into<String>,
        shares: i64,
        price: Decimal,
    ) -> Self {
        Self {
            timestamp,
            ticker: ticker.into(),
            shares,
            price,
            total_cost: Decimal::from(shares) * price,
        }
    }
}
