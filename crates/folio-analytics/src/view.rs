//! 표시용 포트폴리오 스냅샷.
//!
//! 재구성된 상태와 로그의 최신 종가를 결합하여 보유 현황, 비중,
//! 손익을 담은 프레젠테이션용 값을 만듭니다. HTML/차트 형식에 대한
//! 지식은 여기에 없습니다. 그것은 리포트 계층의 일입니다.

use chrono::{DateTime, Utc};
use folio_core::PortfolioState;
use folio_data::LogStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 보유 종목 하나의 표시용 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// 종목 티커
    pub ticker: String,
    /// 보유 수량
    pub shares: i64,
    /// 최신 종가
    pub price: Decimal,
    /// 평가액 (수량 × 종가)
    pub value: Decimal,
    /// 포트폴리오 내 비중 (%)
    pub weight_pct: Decimal,
}

/// 포트폴리오 전체 스냅샷.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioView {
    /// 보유 종목 목록 (수량 > 0만 포함, 티커 순)
    pub holdings: Vec<Holding>,
    /// 현금 잔고
    pub cash: Decimal,
    /// 주식 평가액 합계
    pub total_stock_value: Decimal,
    /// 총 포트폴리오 평가액 (현금 + 주식)
    pub total_portfolio_value: Decimal,
    /// 총 손익 (평가액 − 초기 자본)
    pub total_pnl: Decimal,
    /// 손익률 (%)
    pub pnl_percent: Decimal,
    /// 상태 기준 시각
    pub as_of: Option<DateTime<Utc>>,
}

impl PortfolioView {
    /// 상태와 로그에서 표시용 스냅샷을 조립합니다.
    ///
    /// `initial_value`는 호출자가 제공하는 기준 자본이며 로그에서
    /// 파생되지 않습니다. 가격이 관측된 적 없는 종목은 종가 0으로
    /// 평가됩니다.
    pub fn build(
        state: &PortfolioState,
        store: &LogStore,
        tickers: &[String],
        initial_value: Decimal,
    ) -> Self {
        let mut holdings: Vec<Holding> = tickers
            .iter()
            .filter_map(|ticker| {
                let shares = state.position(ticker);
                if shares <= 0 {
                    return None;
                }
                let price = store.latest_close(ticker).unwrap_or(Decimal::ZERO);
                Some(Holding {
                    ticker: ticker.clone(),
                    shares,
                    price,
                    value: Decimal::from(shares) * price,
                    weight_pct: Decimal::ZERO,
                })
            })
            .collect();

        let total_stock_value: Decimal = holdings.iter().map(|h| h.value).sum();
        let total_portfolio_value = state.cash + total_stock_value;

        // 비중은 총액이 정해진 뒤에 채운다
        if !total_portfolio_value.is_zero() {
            for holding in &mut holdings {
                holding.weight_pct =
                    holding.value / total_portfolio_value * Decimal::ONE_HUNDRED;
            }
        }

        let total_pnl = total_portfolio_value - initial_value;
        let pnl_percent = if initial_value.is_zero() {
            Decimal::ZERO
        } else {
            total_pnl / initial_value * Decimal::ONE_HUNDRED
        };

        Self {
            holdings,
            cash: state.cash,
            total_stock_value,
            total_portfolio_value,
            total_pnl,
            pnl_percent,
            as_of: state.as_of,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use folio_core::LogRecord;
    use rust_decimal_macros::dec;

    fn sample_store() -> LogStore {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        LogStore::from_records(vec![
            LogRecord::observation(ts, "AAPL", dec!(150)),
            LogRecord::observation(ts, "MSFT", dec!(400)),
        ])
    }

    fn tickers() -> Vec<String> {
        vec!["AAPL".to_string(), "MSFT".to_string(), "GOOG".to_string()]
    }

    #[test]
    fn test_zero_share_holdings_filtered() {
        let mut state = PortfolioState::default_with(&tickers(), dec!(5000));
        state.positions.insert("AAPL".to_string(), 10);

        let view = PortfolioView::build(&state, &sample_store(), &tickers(), dec!(10000));

        assert_eq!(view.holdings.len(), 1);
        assert_eq!(view.holdings[0].ticker, "AAPL");
        assert_eq!(view.holdings[0].value, dec!(1500));
    }

    #[test]
    fn test_totals_and_pnl() {
        let mut state = PortfolioState::default_with(&tickers(), dec!(5000));
        state.positions.insert("AAPL".to_string(), 10); // 1500
        state.positions.insert("MSFT".to_string(), 5); // 2000

        let view = PortfolioView::build(&state, &sample_store(), &tickers(), dec!(10000));

        assert_eq!(view.total_stock_value, dec!(3500));
        assert_eq!(view.total_portfolio_value, dec!(8500));
        assert_eq!(view.total_pnl, dec!(-1500));
        assert_eq!(view.pnl_percent, dec!(-15));
    }

    #[test]
    fn test_weights_sum_to_full_portfolio_share() {
        let mut state = PortfolioState::default_with(&tickers(), dec!(6500));
        state.positions.insert("AAPL".to_string(), 10); // 1500

        let view = PortfolioView::build(&state, &sample_store(), &tickers(), dec!(10000));

        // 1500 / 8000 = 18.75%
        assert_eq!(view.holdings[0].weight_pct, dec!(18.75));
    }

    #[test]
    fn test_unpriced_ticker_valued_at_zero() {
        let mut state = PortfolioState::default_with(&tickers(), dec!(1000));
        state.positions.insert("GOOG".to_string(), 3);

        let view = PortfolioView::build(&state, &sample_store(), &tickers(), dec!(1000));

        assert_eq!(view.holdings[0].price, dec!(0));
        assert_eq!(view.holdings[0].value, dec!(0));
        assert_eq!(view.total_portfolio_value, dec!(1000));
        assert_eq!(view.total_pnl, dec!(0));
    }

    #[test]
    fn test_zero_initial_value_guarded() {
        let state = PortfolioState::default_with(&tickers(), dec!(1000));
        let view = PortfolioView::build(&state, &sample_store(), &tickers(), dec!(0));

        assert_eq!(view.pnl_percent, dec!(0));
        assert_eq!(view.total_pnl, dec!(1000));
    }
}
