//! 포트폴리오 대시보드 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본 설정 파일로 대시보드 생성
//! folio export
//!
//! # 로그/출력 경로 지정
//! folio export -l trading_log.csv -o public/index.html
//!
//! # 일별 버킷으로 집계
//! folio export -g day
//!
//! # 터미널 요약만 출력
//! folio summary
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::Path;

use folio_core::{init_logging, AppConfig, BucketGranularity, LogConfig};

mod commands;

use commands::export::{run_export, ExportConfig};
use commands::summary::{run_summary, SummaryConfig};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio dashboard CLI - 거래 로그 기반 포트폴리오 분석 및 대시보드 생성", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 정적 HTML 대시보드 생성
    Export {
        /// 거래 로그 CSV 경로
        #[arg(short, long, default_value = "trading_log.csv")]
        log: String,

        /// 출력 HTML 경로 (기본: 설정 파일의 report.output_path)
        #[arg(short, long)]
        output: Option<String>,

        /// 평가액 버킷 단위 (hour, day)
        #[arg(short, long)]
        granularity: Option<String>,
    },

    /// 포트폴리오 요약을 터미널에 출력
    Summary {
        /// 거래 로그 CSV 경로
        #[arg(short, long, default_value = "trading_log.csv")]
        log: String,

        /// 평가액 버킷 단위 (hour, day)
        #[arg(short, long)]
        granularity: Option<String>,
    },
}

/// 설정 파일이 있으면 로드하고, 없으면 기본값을 사용합니다.
fn load_config(path: &str) -> Result<AppConfig> {
    if Path::new(path).exists() {
        AppConfig::load(path).map_err(|e| anyhow!("설정 로드 실패 ({}): {}", path, e))
    } else {
        Ok(AppConfig::default())
    }
}

/// CLI 인자와 설정 파일에서 버킷 단위를 결정합니다.
fn resolve_granularity(cli_value: Option<&str>, config_value: &str) -> Result<BucketGranularity> {
    let value = cli_value.unwrap_or(config_value);
    BucketGranularity::parse(value)
        .ok_or_else(|| anyhow!("Invalid granularity: {}. Supported: hour, day", value))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    // 트레이싱 초기화 (설정 파일 → RUST_LOG 오버라이드)
    let log_config = LogConfig::new(&config.logging.level)
        .with_format(config.logging.format.parse().unwrap_or_default());
    init_logging(log_config).map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    match cli.command {
        Commands::Export {
            log,
            output,
            granularity,
        } => {
            let granularity =
                resolve_granularity(granularity.as_deref(), &config.portfolio.granularity)?;
            let output_path = output.unwrap_or_else(|| config.report.output_path.clone());

            run_export(ExportConfig {
                log_path: log,
                output_path,
                tickers: config.portfolio.tickers.clone(),
                initial_value: config.portfolio.initial_value,
                default_cash: config.portfolio.default_cash,
                granularity,
                recent_trades: config.report.recent_trades,
            })
        }

        Commands::Summary { log, granularity } => {
            let granularity =
                resolve_granularity(granularity.as_deref(), &config.portfolio.granularity)?;

            run_summary(SummaryConfig {
                log_path: log,
                tickers: config.portfolio.tickers.clone(),
                initial_value: config.portfolio.initial_value,
                default_cash: config.portfolio.default_cash,
                granularity,
            })
        }
    }
}
