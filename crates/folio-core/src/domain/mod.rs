//! 도메인 모델.
//!
//! 로그 레코드, 포트폴리오 상태, 체결 기록, 평가액 포인트 등
//! 시스템 전반에서 공유되는 값 타입을 정의합니다.

pub mod portfolio;
pub mod record;
pub mod trade;
pub mod valuation;

pub use portfolio::PortfolioState;
pub use record::{LogRecord, TradeAction};
pub use trade::Trade;
pub use valuation::{BucketGranularity, ValuationPoint};
