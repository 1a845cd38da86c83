//! 포트폴리오 재구성 및 성과 분석 엔진.
//!
//! 이 크레이트는 append-only 로그에서 파생되는 모든 계산을 담당합니다:
//! - 최신 포트폴리오 상태 재구성 (체크포인트 리플레이)
//! - 시간 버킷별 평가액 시계열 집계 (carry-forward)
//! - 성과 지표 계산 (변동성, 최대 낙폭, 승률, 최고/최저 종목)
//! - 표시용 포트폴리오 스냅샷 (보유 현황, 비중, 손익)
//!
//! 모든 단계는 입력의 순수 함수이며, 호출할 때마다 로그 전체를
//! 처음부터 다시 처리합니다. 캐시나 증분 상태는 없습니다.
//!
//! # Re-exports
//!
//! - [`reconstruct`]: 상태 재구성 (StateReconstructor)
//! - [`valuation`]: 평가액 집계 (TimeBucketAggregator)
//! - [`metrics`]: 성과 지표 (MetricsEngine, MetricsSnapshot)
//! - [`view`]: 표시용 스냅샷 (PortfolioView)

pub mod metrics;
pub mod reconstruct;
pub mod valuation;
pub mod view;

pub use metrics::{InstrumentReturn, MetricsEngine, MetricsSnapshot, TRADING_DAYS_PER_YEAR};
pub use reconstruct::{Reconstruction, StateReconstructor};
pub use valuation::TimeBucketAggregator;
pub use view::{Holding, PortfolioView};
