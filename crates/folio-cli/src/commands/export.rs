//! 대시보드 내보내기 명령어.
//!
//! 거래 로그를 분석 파이프라인에 통과시켜 정적 HTML 대시보드를
//! 생성합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본 설정으로 대시보드 생성
//! folio export
//!
//! # 로그/출력 경로 지정
//! folio export -l trading_log.csv -o public/index.html
//!
//! # 일별 버킷으로 집계
//! folio export -g day
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use folio_analytics::{MetricsEngine, PortfolioView, StateReconstructor, TimeBucketAggregator};
use folio_core::BucketGranularity;
use folio_data::LogStore;
use folio_report::Dashboard;

/// 내보내기 CLI 설정
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// 거래 로그 CSV 경로
    pub log_path: String,
    /// 대시보드 HTML 출력 경로
    pub output_path: String,
    /// 추적 종목
    pub tickers: Vec<String>,
    /// 수익률 기준 초기 자본
    pub initial_value: Decimal,
    /// 체크포인트가 없을 때 기본 현금
    pub default_cash: Decimal,
    /// 평가액 버킷 단위
    pub granularity: BucketGranularity,
    /// 최근 체결 표시 개수
    pub recent_trades: usize,
}

/// 대시보드를 생성하고 파일로 씁니다.
pub fn run_export(config: ExportConfig) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("📊 대시보드 내보내기");
    println!("{}", "=".repeat(60));

    println!("\n[1/4] 거래 로그 로드 중...");
    let store = LogStore::from_path(&config.log_path)
        .with_context(|| format!("로그 파일을 읽을 수 없습니다: {}", config.log_path))?;
    println!("  → {} 레코드, {} 종목", store.len(), store.tickers().len());

    println!("[2/4] 포트폴리오 상태 재구성 중...");
    let reconstructor =
        StateReconstructor::new(config.tickers.clone(), config.default_cash);
    let reconstruction = reconstructor.reconstruct(&store);
    println!("  → 현금: {}", reconstruction.state.cash);
    println!("  → 보유: {} 주", reconstruction.state.total_shares());
    println!("  → 체결: {} 건", reconstruction.trades.len());

    println!("[3/4] 평가액 시계열 및 지표 계산 중...");
    let aggregator =
        TimeBucketAggregator::new(config.granularity, config.tickers.clone());
    let valuations = aggregator.aggregate(&store);

    let engine = MetricsEngine::new(config.tickers.clone());
    let metrics = engine.calculate(&valuations, &reconstruction.trades, &store);
    println!(
        "  → {} 평가 포인트 ({})",
        valuations.len(),
        config.granularity.display_name()
    );

    println!("[4/4] HTML 대시보드 생성 중...");
    let view = PortfolioView::build(
        &reconstruction.state,
        &store,
        &config.tickers,
        config.initial_value,
    );
    let dashboard = Dashboard {
        view: &view,
        metrics: &metrics,
        trades: &reconstruction.trades,
        valuations: &valuations,
        store: &store,
        tickers: &config.tickers,
        recent_trades: config.recent_trades,
    };
    let generated_at = Utc::now();
    dashboard.write_to(&config.output_path, generated_at)?;

    info!(output = %config.output_path, "Dashboard export complete");
    println!("\n✅ 대시보드 생성 완료: {}", config.output_path);
    println!("🕐 생성 시각: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("{}", "=".repeat(60));

    Ok(())
}
