//! 정적 HTML 대시보드 렌더링.
//!
//! 분석 결과를 하나의 독립적인 HTML 파일로 만듭니다. Plotly는 CDN에서
//! 로드하고 차트 데이터는 JSON으로 본문에 인라인됩니다. 서버 없이
//! GitHub Pages 같은 정적 호스팅에 바로 올릴 수 있습니다.

use chrono::{DateTime, Utc};
use folio_analytics::{MetricsSnapshot, PortfolioView};
use folio_core::{Trade, ValuationPoint};
use folio_data::LogStore;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use crate::charts;
use crate::error::ReportResult;

/// 대시보드 스타일시트.
const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            padding: 20px;
            min-height: 100vh;
        }
        .container {
            max-width: 1400px;
            margin: 0 auto;
            background: white;
            border-radius: 20px;
            padding: 30px;
            box-shadow: 0 20px 60px rgba(0,0,0,0.3);
        }
        h1 { text-align: center; color: #2c3e50; margin-bottom: 10px; font-size: 2.5em; }
        .last-update { text-align: center; color: #7f8c8d; margin-bottom: 30px; font-size: 0.9em; }
        .kpi-container {
            display: flex;
            justify-content: space-around;
            flex-wrap: wrap;
            margin-bottom: 30px;
            gap: 15px;
        }
        .kpi-card {
            background: white;
            padding: 20px;
            border-radius: 12px;
            text-align: center;
            min-width: 180px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
            border: 2px solid #ecf0f1;
        }
        .kpi-icon { font-size: 32px; margin-bottom: 10px; }
        .kpi-value { font-size: 24px; font-weight: bold; margin-bottom: 5px; }
        .kpi-label { font-size: 12px; color: #7f8c8d; }
        .content-grid {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 20px;
            margin-bottom: 30px;
        }
        .card {
            background: white;
            padding: 20px;
            border-radius: 12px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
        }
        .card h3 { color: #34495e; margin-bottom: 15px; text-align: center; }
        table { width: 100%; border-collapse: collapse; }
        th { background: #3498db; color: white; padding: 12px; font-weight: bold; }
        td { padding: 10px; text-align: center; border-bottom: 1px solid #ecf0f1; }
        .chart-container { width: 100%; height: 400px; margin-top: 10px; }
        .trade-item { padding: 12px; margin: 4px 0; border-radius: 8px; border-left: 4px solid #3498db; }
        .trade-time { font-weight: bold; color: #3498db; }
        .trade-stock { color: #2c3e50; font-weight: bold; margin-left: 10px; }
        .trade-details { color: #7f8c8d; margin-top: 5px; }
        @media (max-width: 768px) {
            .content-grid { grid-template-columns: 1fr; }
            .kpi-container { flex-direction: column; }
        }
"#;

/// 대시보드 렌더러.
///
/// 분석 파이프라인의 출력을 참조로 받아 HTML 문자열을 만듭니다.
/// 입력을 소유하거나 변경하지 않습니다.
pub struct Dashboard<'a> {
    /// 표시용 포트폴리오 스냅샷
    pub view: &'a PortfolioView,
    /// 성과 지표
    pub metrics: &'a MetricsSnapshot,
    /// 전체 매수 체결 목록 (시간순)
    pub trades: &'a [Trade],
    /// 평가액 시계열
    pub valuations: &'a [ValuationPoint],
    /// 원본 로그 (가격 차트용)
    pub store: &'a LogStore,
    /// 추적 종목
    pub tickers: &'a [String],
    /// 최근 체결 표시 개수
    pub recent_trades: usize,
}

impl Dashboard<'_> {
    /// 대시보드 HTML을 렌더링합니다.
    pub fn render(&self, generated_at: DateTime<Utc>) -> ReportResult<String> {
        let pie_json = serde_json::to_string(&charts::allocation_pie(self.view))?;
        let timeline_json = serde_json::to_string(&charts::value_timeline(self.valuations))?;
        let prices_json = serde_json::to_string(&charts::price_lines(self.store, self.tickers))?;

        let pnl_color = if self.view.total_pnl >= Decimal::ZERO {
            "#27ae60"
        } else {
            "#e74c3c"
        };
        let last_update = generated_at.format("%Y-%m-%d %H:%M:%S UTC");
        let holdings_table = self.holdings_table();
        let recent_trades = self.recent_trades_list();

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Portfolio Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.26.0.min.js"></script>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h1>📊 Portfolio Dashboard</h1>
        <div class="last-update">Last updated: {last_update}</div>

        <div class="kpi-container">
            <div class="kpi-card">
                <div class="kpi-icon">💰</div>
                <div class="kpi-value" style="color: {pnl_color}">{total_pnl}</div>
                <div class="kpi-label">Total P&amp;L</div>
            </div>
            <div class="kpi-card">
                <div class="kpi-icon">📈</div>
                <div class="kpi-value" style="color: {pnl_color}">{pnl_percent}</div>
                <div class="kpi-label">Return %</div>
            </div>
            <div class="kpi-card">
                <div class="kpi-icon">🎯</div>
                <div class="kpi-value" style="color: #3498db">{win_rate}</div>
                <div class="kpi-label">Win Rate</div>
            </div>
            <div class="kpi-card">
                <div class="kpi-icon">📊</div>
                <div class="kpi-value" style="color: #9b59b6">{volatility}</div>
                <div class="kpi-label">Volatility</div>
            </div>
            <div class="kpi-card">
                <div class="kpi-icon">🔢</div>
                <div class="kpi-value" style="color: #1abc9c">{total_trades}</div>
                <div class="kpi-label">Total Trades</div>
            </div>
        </div>

        <div class="content-grid">
            <div class="card">
                <h3>💼 Portfolio Overview</h3>
                <div style="text-align: center; margin: 20px 0;">
                    <div style="font-size: 36px; font-weight: bold; color: #2980b9;">
                        {total_value}
                    </div>
                    <div style="color: #7f8c8d; margin-top: 5px;">Total Portfolio Value</div>
                </div>
                <div style="display: flex; justify-content: space-around; margin-top: 20px;">
                    <div style="text-align: center;">
                        <div style="font-size: 18px; font-weight: bold;">{cash}</div>
                        <div style="font-size: 14px; color: #7f8c8d;">💵 Cash</div>
                    </div>
                    <div style="text-align: center;">
                        <div style="font-size: 18px; font-weight: bold;">{stock_value}</div>
                        <div style="font-size: 14px; color: #7f8c8d;">📊 Stock Value</div>
                    </div>
                </div>
                <div id="pieChart" class="chart-container"></div>
            </div>

            <div class="card">
                <h3>📈 Current Holdings</h3>
                {holdings_table}

                <h3 style="margin-top: 30px;">🔔 Recent Activity</h3>
                {recent_trades}
            </div>
        </div>

        <div class="content-grid">
            <div class="card">
                <h3>📊 Portfolio Value Over Time</h3>
                <div id="timelineChart" class="chart-container"></div>
            </div>
            <div class="card">
                <h3>💹 Stock Prices</h3>
                <div id="pricesChart" class="chart-container"></div>
            </div>
        </div>
    </div>

    <script>
        const pieChart = {pie_json};
        const timelineChart = {timeline_json};
        const pricesChart = {prices_json};
        Plotly.newPlot('pieChart', pieChart.data, pieChart.layout, {{responsive: true}});
        Plotly.newPlot('timelineChart', timelineChart.data, timelineChart.layout, {{responsive: true}});
        Plotly.newPlot('pricesChart', pricesChart.data, pricesChart.layout, {{responsive: true}});
    </script>
</body>
</html>
"#,
            style = STYLE,
            last_update = last_update,
            pnl_color = pnl_color,
            total_pnl = fmt_money(self.view.total_pnl),
            pnl_percent = fmt_signed_pct(self.view.pnl_percent),
            win_rate = fmt_pct(self.metrics.win_rate_pct),
            volatility = fmt_pct(self.metrics.volatility_pct),
            total_trades = self.metrics.total_trades,
            total_value = fmt_money(self.view.total_portfolio_value),
            cash = fmt_money(self.view.cash),
            stock_value = fmt_money(self.view.total_stock_value),
            holdings_table = holdings_table,
            recent_trades = recent_trades,
            pie_json = pie_json,
            timeline_json = timeline_json,
            prices_json = prices_json,
        ))
    }

    /// 대시보드를 파일로 씁니다. 필요하면 출력 디렉토리를 생성합니다.
    pub fn write_to<P: AsRef<Path>>(
        &self,
        path: P,
        generated_at: DateTime<Utc>,
    ) -> ReportResult<()> {
        let html = self.render(generated_at)?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path.as_ref(), &html)?;
        info!(
            path = %path.as_ref().display(),
            bytes = html.len(),
            "Dashboard written"
        );
        Ok(())
    }

    /// 보유 종목 테이블 HTML.
    fn holdings_table(&self) -> String {
        if self.view.holdings.is_empty() {
            return r#"<div style="text-align: center; padding: 30px; color: #95a5a6;">No current holdings</div>"#
                .to_string();
        }

        let mut html = String::from(
            "<table><thead><tr><th>Stock</th><th>Shares</th><th>Price</th>\
             <th>Value</th><th>Weight</th></tr></thead><tbody>",
        );
        for holding in &self.view.holdings {
            html.push_str(&format!(
                r#"<tr><td style="font-weight: bold;">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                holding.ticker,
                holding.shares,
                fmt_money(holding.price),
                fmt_money(holding.value),
                fmt_pct(holding.weight_pct),
            ));
        }
        html.push_str("</tbody></table>");
        html
    }

    /// 최근 체결 목록 HTML. 최신순으로 표시합니다.
    fn recent_trades_list(&self) -> String {
        if self.trades.is_empty() {
            return r#"<div style="text-align: center; padding: 30px; color: #95a5a6;">No recent trades</div>"#
                .to_string();
        }

        let mut html = String::new();
        for trade in self.trades.iter().rev().take(self.recent_trades) {
            html.push_str(&format!(
                r#"
        <div class="trade-item">
            <div>
                <span class="trade-time">{}</span>
                <span class="trade-stock">• {}</span>
            </div>
            <div class="trade-details">
                {} shares @ {} = {}
            </div>
        </div>"#,
                trade.timestamp.format("%m/%d %H:%M"),
                trade.ticker,
                trade.shares,
                fmt_money(trade.price),
                fmt_money(trade.total_cost),
            ));
        }
        html
    }
}

/// 금액을 `$1,234.56` 형태로 포맷합니다.
fn fmt_money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let text = format!("{:.2}", rounded);
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}{}.{}", sign, grouped, frac_part)
}

/// 퍼센트를 소수 첫째 자리로 포맷합니다.
fn fmt_pct(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

/// 부호를 항상 붙이는 퍼센트 포맷.
fn fmt_signed_pct(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded >= Decimal::ZERO {
        format!("+{:.2}%", rounded)
    } else {
        format!("{:.2}%", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use folio_analytics::Holding;
    use folio_core::LogRecord;
    use rust_decimal_macros::dec;

    fn sample_view() -> PortfolioView {
        PortfolioView {
            holdings: vec![Holding {
                ticker: "AAPL".to_string(),
                shares: 10,
                price: dec!(158),
                value: dec!(1580),
                weight_pct: dec!(19.57),
            }],
            cash: dec!(6490),
            total_stock_value: dec!(1580),
            total_portfolio_value: dec!(8070),
            total_pnl: dec!(-1930),
            pnl_percent: dec!(-19.3),
            as_of: None,
        }
    }

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(fmt_money(dec!(1234.5)), "$1,234.50");
        assert_eq!(fmt_money(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(fmt_money(dec!(-1930)), "$-1,930.00");
        assert_eq!(fmt_money(dec!(0)), "$0.00");
        assert_eq!(fmt_money(dec!(999)), "$999.00");
    }

    #[test]
    fn test_signed_pct() {
        assert_eq!(fmt_signed_pct(dec!(0.95)), "+0.95%");
        assert_eq!(fmt_signed_pct(dec!(-19.3)), "-19.30%");
        assert_eq!(fmt_signed_pct(dec!(0)), "+0.00%");
    }

    #[test]
    fn test_render_contains_kpis_and_holdings() {
        let view = sample_view();
        let metrics = MetricsSnapshot {
            win_rate_pct: dec!(100),
            total_trades: 2,
            ..Default::default()
        };
        let trades = vec![
            Trade::new(ts(9), "AAPL", 10, dec!(150)),
            Trade::new(ts(10), "MSFT", 5, dec!(402)),
        ];
        let store = LogStore::from_records(vec![LogRecord::observation(ts(9), "AAPL", dec!(150))]);
        let tickers = vec!["AAPL".to_string(), "MSFT".to_string()];

        let dashboard = Dashboard {
            view: &view,
            metrics: &metrics,
            trades: &trades,
            valuations: &[],
            store: &store,
            tickers: &tickers,
            recent_trades: 5,
        };
        let html = dashboard.render(ts(12)).unwrap();

        assert!(html.contains("$-1,930.00"));
        assert!(html.contains("100.0%"));
        assert!(html.contains("AAPL"));
        assert!(html.contains("Last updated: 2024-03-15 12:00:00 UTC"));
        // 최근 체결은 최신순: MSFT가 AAPL보다 먼저 나와야 함
        let msft = html.find("• MSFT").unwrap();
        let aapl = html.find("• AAPL").unwrap();
        assert!(msft < aapl);
    }

    #[test]
    fn test_render_empty_portfolio_placeholders() {
        let view = PortfolioView {
            holdings: vec![],
            cash: dec!(10000),
            total_stock_value: dec!(0),
            total_portfolio_value: dec!(10000),
            total_pnl: dec!(0),
            pnl_percent: dec!(0),
            as_of: None,
        };
        let metrics = MetricsSnapshot::default();
        let store = LogStore::default();
        let tickers: Vec<String> = vec![];

        let dashboard = Dashboard {
            view: &view,
            metrics: &metrics,
            trades: &[],
            valuations: &[],
            store: &store,
            tickers: &tickers,
            recent_trades: 5,
        };
        let html = dashboard.render(ts(12)).unwrap();

        assert!(html.contains("No current holdings"));
        assert!(html.contains("No recent trades"));
    }
}
