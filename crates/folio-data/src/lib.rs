//! 거래/시세 로그 접근 계층.
//!
//! 이 크레이트는 append-only CSV 로그에 대한 읽기 전용 뷰를 제공합니다.
//! 로그는 절대 변경되지 않으며, 모든 상위 단계(재구성/집계/지표)는
//! 이 뷰가 보장하는 정렬 순서에 의존합니다.
//!
//! # Re-exports
//!
//! - [`LogStore`]: 정렬된 로그 뷰
//! - [`DataError`]: 데이터 계층 오류 타입

pub mod error;
pub mod store;

pub use error::{DataError, DataResult};
pub use store::LogStore;
