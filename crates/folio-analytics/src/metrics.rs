//! 성과 지표 계산.
//!
//! 평가액 시계열과 체결 목록에서 변동성, 최대 낙폭, 승률,
//! 최고/최저 수익 종목을 계산합니다. 스냅샷은 호출할 때마다 새로
//! 계산되며 어디에도 저장되지 않습니다.
//!
//! 표준편차/제곱근 커널은 f64로 계산한 뒤 Decimal로 되돌립니다.
//! 퍼센트 지표의 표시 정밀도에서는 이 변환 오차가 무시할 수 있는
//! 수준입니다.

use folio_core::{Trade, ValuationPoint};
use folio_data::LogStore;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 연간 거래일 수.
///
/// 변동성 연율화 계수 √252는 버킷 단위와 무관하게 항상 적용됩니다.
/// 시간별 버킷에서도 일별 계수를 쓰는 것은 알려진 한계이며 의도적으로
/// 유지됩니다.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// 종목 하나의 전체 구간 단순 수익률.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentReturn {
    /// 종목 티커
    pub ticker: String,
    /// 단순 수익률 (%)
    pub return_pct: Decimal,
}

/// 성과 지표 스냅샷.
///
/// 평가액 포인트가 2개 미만이면 모든 필드가 기본값(0/None)입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// 연율화 변동성 (%)
    pub volatility_pct: Decimal,
    /// 최대 낙폭 (%)
    pub max_drawdown_pct: Decimal,
    /// 승률 (%)
    pub win_rate_pct: Decimal,
    /// 전체 매수 체결 수
    pub total_trades: usize,
    /// 이긴 체결 수
    pub winning_trades: usize,
    /// 최고 수익 종목
    pub best_stock: Option<InstrumentReturn>,
    /// 최저 수익 종목
    pub worst_stock: Option<InstrumentReturn>,
}

/// 성과 지표 계산기.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    tickers: Vec<String>,
}

impl MetricsEngine {
    /// 새 지표 계산기를 생성합니다.
    pub fn new(tickers: Vec<String>) -> Self {
        Self { tickers }
    }

    /// 평가액 시계열 + 체결 목록 + 로그에서 지표 스냅샷을 계산합니다.
    pub fn calculate(
        &self,
        valuations: &[ValuationPoint],
        trades: &[Trade],
        store: &LogStore,
    ) -> MetricsSnapshot {
        if valuations.len() < 2 {
            debug!(points = valuations.len(), "Not enough valuation points for metrics");
            return MetricsSnapshot::default();
        }

        let returns = period_returns(valuations);
        let (winning_trades, win_rate_pct) = self.win_rate(trades, store);
        let (best_stock, worst_stock) = self.instrument_returns(store);

        let snapshot = MetricsSnapshot {
            volatility_pct: annualized_volatility(&returns),
            max_drawdown_pct: max_drawdown(valuations),
            win_rate_pct,
            total_trades: trades.len(),
            winning_trades,
            best_stock,
            worst_stock,
        };

        debug!(
            volatility = %snapshot.volatility_pct,
            drawdown = %snapshot.max_drawdown_pct,
            win_rate = %snapshot.win_rate_pct,
            "Metrics calculated"
        );
        snapshot
    }

    /// 승률을 계산합니다.
    ///
    /// 매수 체결은 같은 종목의 "체결 이후" 가격 기록 중 시간상 마지막
    /// 종가가 진입가보다 높을 때만 이긴 것으로 봅니다. 이후 가격
    /// 기록이 없는 체결은 분모에는 포함되지만 진 것으로 처리됩니다
    /// (조건이 성립할 수 없으므로). 체결이 없으면 0%입니다.
    fn win_rate(&self, trades: &[Trade], store: &LogStore) -> (usize, Decimal) {
        if trades.is_empty() {
            return (0, Decimal::ZERO);
        }

        let winning = trades
            .iter()
            .filter(|trade| {
                let last_later_close = store
                    .records()
                    .iter()
                    .rev()
                    .filter(|r| r.ticker == trade.ticker && r.timestamp > trade.timestamp)
                    .find_map(|r| r.close);
                matches!(last_later_close, Some(close) if close > trade.price)
            })
            .count();

        let rate = Decimal::from(winning as u64) / Decimal::from(trades.len() as u64)
            * Decimal::ONE_HUNDRED;
        (winning, rate)
    }

    /// 추적 종목별 전체 구간 수익률을 계산해 최고/최저를 고릅니다.
    ///
    /// 로그 전체에서 종가 관측이 2개 이상인 종목만 대상입니다.
    /// 동률이면 추적 목록 순서상 먼저 나온 종목이 유지됩니다.
    fn instrument_returns(
        &self,
        store: &LogStore,
    ) -> (Option<InstrumentReturn>, Option<InstrumentReturn>) {
        let mut best: Option<InstrumentReturn> = None;
        let mut worst: Option<InstrumentReturn> = None;

        for ticker in &self.tickers {
            let Some((first, last)) = store.first_last_close(ticker) else {
                continue;
            };
            // 첫 종가가 0이면 수익률을 정의할 수 없으므로 0으로 본다
            let return_pct = if first.is_zero() {
                Decimal::ZERO
            } else {
                (last - first) / first * Decimal::ONE_HUNDRED
            };

            let entry = InstrumentReturn {
                ticker: ticker.clone(),
                return_pct,
            };
            if best.as_ref().map_or(true, |b| return_pct > b.return_pct) {
                best = Some(entry.clone());
            }
            if worst.as_ref().map_or(true, |w| return_pct < w.return_pct) {
                worst = Some(entry);
            }
        }

        (best, worst)
    }
}

/// 연속 포인트 간 기간 수익률을 계산합니다.
///
/// 직전 평가액이 0이면 해당 수익률은 0으로 처리합니다 (크래시 금지).
fn period_returns(valuations: &[ValuationPoint]) -> Vec<f64> {
    valuations
        .windows(2)
        .map(|pair| {
            let prev = pair[0].total_value;
            if prev.is_zero() {
                return 0.0;
            }
            ((pair[1].total_value - prev) / prev)
                .to_f64()
                .unwrap_or(0.0)
        })
        .collect()
}

/// 기간 수익률의 연율화 변동성을 계산합니다 (%).
///
/// 모집단 표준편차(분모 n)를 사용합니다.
fn annualized_volatility(returns: &[f64]) -> Decimal {
    if returns.is_empty() {
        return Decimal::ZERO;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let volatility = variance.sqrt() * f64::from(TRADING_DAYS_PER_YEAR).sqrt() * 100.0;

    Decimal::from_f64(volatility).unwrap_or(Decimal::ZERO)
}

/// 최대 낙폭을 계산합니다 (%).
///
/// 피크는 항상 "지금까지 본" 최고값입니다. 미래 피크 기준으로
/// 낙폭을 재지 않습니다.
fn max_drawdown(valuations: &[ValuationPoint]) -> Decimal {
    let mut peak = valuations[0].total_value;
    let mut max_dd = Decimal::ZERO;

    for point in &valuations[1..] {
        if !peak.is_zero() {
            let drawdown = (peak - point.total_value) / peak * Decimal::ONE_HUNDRED;
            if drawdown > max_dd {
                max_dd = drawdown;
            }
        }
        if point.total_value > peak {
            peak = point.total_value;
        }
    }

    max_dd
}
