//! 정적 대시보드 리포트 계층.
//!
//! 분석 파이프라인의 출력(상태, 체결, 평가액 시계열, 지표)을 받아
//! Plotly 차트가 포함된 단일 HTML 파일을 생성합니다. 코어/분석
//! 계층은 이 크레이트를 모릅니다. 표시 형식에 대한 지식은 전부
//! 여기에 있습니다.

pub mod charts;
pub mod error;
pub mod html;

pub use error::{ReportError, ReportResult};
pub use html::Dashboard;
