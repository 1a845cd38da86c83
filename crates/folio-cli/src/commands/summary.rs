//! 포트폴리오 요약 명령어.
//!
//! HTML을 만들지 않고 현재 상태와 성과 지표를 터미널에 출력합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! folio summary
//! folio summary -l trading_log.csv -g day
//! ```

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use folio_analytics::{MetricsEngine, PortfolioView, StateReconstructor, TimeBucketAggregator};
use folio_core::BucketGranularity;
use folio_data::LogStore;

/// 요약 CLI 설정
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// 거래 로그 CSV 경로
    pub log_path: String,
    /// 추적 종목
    pub tickers: Vec<String>,
    /// 수익률 기준 초기 자본
    pub initial_value: Decimal,
    /// 체크포인트가 없을 때 기본 현금
    pub default_cash: Decimal,
    /// 평가액 버킷 단위
    pub granularity: BucketGranularity,
}

/// 포트폴리오 요약을 출력합니다.
pub fn run_summary(config: SummaryConfig) -> Result<()> {
    let store = LogStore::from_path(&config.log_path)
        .with_context(|| format!("로그 파일을 읽을 수 없습니다: {}", config.log_path))?;

    let reconstructor =
        StateReconstructor::new(config.tickers.clone(), config.default_cash);
    let reconstruction = reconstructor.reconstruct(&store);

    let aggregator =
        TimeBucketAggregator::new(config.granularity, config.tickers.clone());
    let valuations = aggregator.aggregate(&store);

    let engine = MetricsEngine::new(config.tickers.clone());
    let metrics = engine.calculate(&valuations, &reconstruction.trades, &store);

    let view = PortfolioView::build(
        &reconstruction.state,
        &store,
        &config.tickers,
        config.initial_value,
    );

    println!("{}", "=".repeat(60));
    println!("📊 포트폴리오 요약");
    println!("{}", "=".repeat(60));

    match view.as_of {
        Some(as_of) => println!("기준 시각: {}", as_of.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("기준 시각: 체크포인트 없음 (기본 상태)"),
    }

    println!("\n💼 보유 현황");
    if view.holdings.is_empty() {
        println!("  (보유 종목 없음)");
    } else {
        for holding in &view.holdings {
            println!(
                "  {} : {} 주 @ {} = {} ({:.1}%)",
                holding.ticker,
                holding.shares,
                holding.price,
                holding.value,
                holding.weight_pct.round_dp(1)
            );
        }
    }

    println!("\n💰 평가액");
    println!("  현금      : {}", view.cash);
    println!("  주식      : {}", view.total_stock_value);
    println!("  총 평가액 : {}", view.total_portfolio_value);

    let pnl_emoji = if view.total_pnl >= Decimal::ZERO {
        "📈"
    } else {
        "📉"
    };
    println!(
        "  {} 손익   : {} ({:.2}%)",
        pnl_emoji,
        view.total_pnl,
        view.pnl_percent.round_dp(2)
    );

    println!("\n🎯 성과 지표 ({})", config.granularity.display_name());
    println!("  변동성     : {:.1}%", metrics.volatility_pct.round_dp(1));
    println!("  최대 낙폭  : {:.1}%", metrics.max_drawdown_pct.round_dp(1));
    println!(
        "  승률       : {:.1}% ({}/{})",
        metrics.win_rate_pct.round_dp(1),
        metrics.winning_trades,
        metrics.total_trades
    );
    match &metrics.best_stock {
        Some(best) => println!(
            "  최고 종목  : {} ({:.1}%)",
            best.ticker,
            best.return_pct.round_dp(1)
        ),
        None => println!("  최고 종목  : N/A"),
    }
    match &metrics.worst_stock {
        Some(worst) => println!(
            "  최저 종목  : {} ({:.1}%)",
            worst.ticker,
            worst.return_pct.round_dp(1)
        ),
        None => println!("  최저 종목  : N/A"),
    }

    println!("{}", "=".repeat(60));
    Ok(())
}
