//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 재구성 기준값(초기 자본), 추적 종목, 버킷 단위 등은 모두 호출자가
//! 설정으로 제공하며 코드에 하드코딩하지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FolioError, FolioResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 포트폴리오 재구성 설정
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 리포트 출력 설정
    #[serde(default)]
    pub report: ReportConfig,
}

/// 포트폴리오 재구성 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortfolioConfig {
    /// 수익률 기준이 되는 초기 자본 (로그에서 파생되지 않음)
    pub initial_value: Decimal,
    /// 체크포인트가 없을 때 사용할 기본 현금 잔고
    pub default_cash: Decimal,
    /// 추적 종목 집합
    pub tickers: Vec<String>,
    /// 평가액 버킷 단위 (hour, day)
    pub granularity: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            initial_value: Decimal::new(10000, 0),
            default_cash: Decimal::new(10000, 0),
            tickers: Vec::new(),
            granularity: "hour".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 리포트 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// 대시보드 HTML 출력 경로
    pub output_path: String,
    /// 최근 활동 섹션에 표시할 체결 수
    pub recent_trades: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: "public/index.html".to_string(),
            recent_trades: 5,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> FolioResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("portfolio.granularity", "hour")
            .map_err(|e| FolioError::Config(e.to_string()))?
            .set_default("report.output_path", "public/index.html")
            .map_err(|e| FolioError::Config(e.to_string()))?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder
            .build()
            .map_err(|e| FolioError::Config(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| FolioError::Config(e.to_string()))
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> FolioResult<Self> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.portfolio.initial_value, dec!(10000));
        assert_eq!(config.portfolio.granularity, "hour");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.report.recent_trades, 5);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, crate::error::FolioError::Config(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.portfolio.tickers, config.portfolio.tickers);
    }
}
