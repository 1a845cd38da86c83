//! # Folio Core
//!
//! 포트폴리오 대시보드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 거래/시세 로그 레코드 구조체
//! - 포트폴리오 상태 값
//! - 체결(매수) 기록
//! - 평가액 시계열 포인트
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
