//! 거래/시세 로그 레코드.
//!
//! 로그는 append-only이며, 한 행은 특정 시각/종목의 거래 이벤트 또는
//! 시세 관측 하나를 나타냅니다. 처리 순서는 항상 타임스탬프 오름차순이고,
//! 동일 타임스탬프 내에서는 원본 삽입 순서가 유지됩니다 (stable).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 로그 레코드의 액션 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    /// 매수 체결
    Buy,
    /// 매도 체결
    Sell,
    /// 기타 (시세 관측 등)
    #[serde(other)]
    Other,
}

impl TradeAction {
    /// 문자열에서 액션을 파싱합니다. 알 수 없는 값은 Other로 처리합니다.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Self::Buy,
            "SELL" => Self::Sell,
            _ => Self::Other,
        }
    }
}

/// 로그의 한 행.
///
/// `position_after`/`cash_after`는 이벤트 직후의 포트폴리오 상태를 완전히
/// 기록한 체크포인트 행에서만 채워집니다. 대부분의 행(단순 시세 관측)은
/// 두 필드가 모두 비어 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// 레코드 타임스탬프 (UTC)
    pub timestamp: DateTime<Utc>,
    /// 종목 티커
    pub ticker: String,
    /// 액션 유형
    pub action: TradeAction,
    /// 수량 (BUY/SELL 행에서 의미 있음)
    pub quantity: i64,
    /// 종가/관측가
    pub close: Option<Decimal>,
    /// 이벤트 이후 보유 수량 (체크포인트 행에서만)
    pub position_after: Option<i64>,
    /// 이벤트 이후 현금 잔고 (체크포인트 행에서만)
    pub cash_after: Option<Decimal>,
}

impl LogRecord {
    /// 시세 관측 행을 생성합니다.
    pub fn observation(
        timestamp: DateTime<Utc>,
        ticker: impl Into<String>,
        close: Decimal,
    ) -> Self {
        Self {
            timestamp,
            ticker: ticker.into(),
            action: TradeAction::Other,
            quantity: 0,
            close: Some(close),
            position_after: None,
            cash_after: None,
        }
    }

    /// 체크포인트 행인지 확인합니다.
    ///
    /// `position_after`와 `cash_after`가 모두 기록된 행만 완전한
    /// 포트폴리오 상태를 나타냅니다.
    pub fn is_checkpoint(&self) -> bool {
        self.position_after.is_some() && self.cash_after.is_some()
    }

    /// 매수 행인지 확인합니다.
    pub fn is_buy(&self) -> bool {
        self.action == TradeAction::Buy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_action_parse() {
        assert_eq!(TradeAction::parse("BUY"), TradeAction::Buy);
        assert_eq!(TradeAction::parse("buy"), TradeAction::Buy);
        assert_eq!(TradeAction::parse(" SELL "), TradeAction::Sell);
        assert_eq!(TradeAction::parse("PRICE_UPDATE"), TradeAction::Other);
        assert_eq!(TradeAction::parse(""), TradeAction::Other);
    }

    #[test]
    fn test_checkpoint_detection() {
        let mut record = LogRecord::observation(Utc::now(), "AAPL", dec!(150));
        assert!(!record.is_checkpoint());

        // 둘 중 하나만 있으면 체크포인트가 아님
        record.position_after = Some(10);
        assert!(!record.is_checkpoint());

        record.cash_after = Some(dec!(5000));
        assert!(record.is_checkpoint());
    }
}
