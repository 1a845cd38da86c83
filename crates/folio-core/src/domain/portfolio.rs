//! 재구성된 포트폴리오 상태.
//!
//! `PortfolioState`는 불변 값입니다. 재구성할 때마다 새 값이 생성되며,
//! 하위 단계가 상위 단계의 출력을 제자리에서 변경하지 않습니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 특정 시점의 포트폴리오 상태 (현금 + 종목별 보유 수량).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioState {
    /// 종목별 보유 수량 (음수 없음)
    pub positions: BTreeMap<String, i64>,
    /// 현금 잔고
    pub cash: Decimal,
    /// 상태 기준 시각 (체크포인트가 없으면 None)
    pub as_of: Option<DateTime<Utc>>,
}

impl PortfolioState {
    /// 추적 종목 전체를 0주로 초기화한 기본 상태를 생성합니다.
    ///
    /// 로그에 체크포인트 행이 하나도 없을 때 사용됩니다.
    /// 이는 에러가 아니라 정상적인 초기 상태입니다.
    pub fn default_with(tickers: &[String], cash: Decimal) -> Self {
        Self {
            positions: tickers.iter().map(|t| (t.clone(), 0)).collect(),
            cash,
            as_of: None,
        }
    }

    /// 특정 종목의 보유 수량을 반환합니다 (없으면 0).
    pub fn position(&self, ticker: &str) -> i64 {
        self.positions.get(ticker).copied().unwrap_or(0)
    }

    /// 총 보유 주식 수를 반환합니다.
    pub fn total_shares(&self) -> i64 {
        self.positions.values().sum()
    }

    /// 보유 중인 종목이 있는지 확인합니다.
    pub fn has_holdings(&self) -> bool {
        self.positions.values().any(|&shares| shares > 0)
    }
}
