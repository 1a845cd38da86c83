//! 포트폴리오 상태 재구성.
//!
//! 로그를 리플레이하여 최신 완전 체크포인트 시점의 `PortfolioState`와
//! 전체 매수 체결 목록을 만듭니다.
//!
//! # 알고리즘
//!
//! 1. `position_after`와 `cash_after`가 모두 있는 체크포인트 행을 선별
//! 2. 체크포인트가 없으면 기본 상태 반환 (에러 아님)
//! 3. 체크포인트 중 최대 타임스탬프 `T`를 찾고, `T`의 모든 행을 검사
//! 4. 추적 종목별로 `T`에서 `position_after`가 있는 마지막 행이 승자
//! 5. 현금은 `T`에서 `cash_after`가 있는 마지막 행이 승자
//! 6. 체결 목록은 `T`와 무관하게 로그 전체의 BUY 행에서 파생
//!
//! 동률 규칙은 스토어의 정렬(타임스탬프 오름차순, 삽입 순서 유지)에
//! 의해 결정됩니다. 같은 재구성을 두 번 실행하면 항상 동일한 상태가
//! 나옵니다 (멱등).

use folio_core::{PortfolioState, Trade};
use folio_data::LogStore;
use rust_decimal::Decimal;
use tracing::debug;

/// 재구성 결과: 최신 상태 + 전체 매수 체결 목록.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// 최신 체크포인트 기준 포트폴리오 상태
    pub state: PortfolioState,
    /// 로그 전체에서 파생된 매수 체결 목록 (시간순)
    pub trades: Vec<Trade>,
}

/// 로그에서 포트폴리오 상태를 재구성하는 계산기.
#[derive(Debug, Clone)]
pub struct StateReconstructor {
    /// 추적 종목 집합
    tickers: Vec<String>,
    /// 체크포인트가 없을 때 사용할 기본 현금 잔고
    default_cash: Decimal,
}

impl StateReconstructor {
    /// 새 재구성기를 생성합니다.
    pub fn new(tickers: Vec<String>, default_cash: Decimal) -> Self {
        Self {
            tickers,
            default_cash,
        }
    }

    /// 로그 전체를 리플레이하여 최신 상태와 체결 목록을 만듭니다.
    pub fn reconstruct(&self, store: &LogStore) -> Reconstruction {
        let trades = self.collect_trades(store);

        // 최신 완전 체크포인트 시각
        let latest_checkpoint = store
            .records()
            .iter()
            .filter(|r| r.is_checkpoint())
            .map(|r| r.timestamp)
            .max();

        let Some(as_of) = latest_checkpoint else {
            debug!("No checkpoint rows found, using default state");
            return Reconstruction {
                state: PortfolioState::default_with(&self.tickers, self.default_cash),
                trades,
            };
        };

        // T 시점 행들을 원본 순서로 훑으며 마지막 non-null 값이 이긴다
        let mut state = PortfolioState::default_with(&self.tickers, self.default_cash);
        let mut cash = None;

        for record in store.records().iter().filter(|r| r.timestamp == as_of) {
            if let Some(position) = record.position_after {
                if self.tickers.iter().any(|t| t == &record.ticker) {
                    state.positions.insert(record.ticker.clone(), position);
                }
            }
            if let Some(value) = record.cash_after {
                cash = Some(value);
            }
        }

        if let Some(value) = cash {
            state.cash = value;
        }
        state.as_of = Some(as_of);

        debug!(
            %as_of,
            cash = %state.cash,
            shares = state.total_shares(),
            trades = trades.len(),
            "Portfolio state reconstructed"
        );

        Reconstruction { state, trades }
    }

    /// 로그 전체의 BUY 행을 체결 기록으로 변환합니다.
    ///
    /// 가격이 기록되지 않은 BUY 행은 가격 0으로 처리합니다
    /// (필드 결측은 크래시가 아닌 무기여).
    fn collect_trades(&self, store: &LogStore) -> Vec<Trade> {
        store
            .records()
            .iter()
            .filter(|r| r.is_buy())
            .map(|r| {
                Trade::new(
                    r.timestamp,
                    r.ticker.clone(),
                    r.quantity,
                    r.close.unwrap_or(Decimal::ZERO),
                )
            })
            .collect()
    }
}
