//! Plotly 차트 JSON 생성.
//!
//! 각 함수는 `Plotly.newPlot(div, payload)`에 바로 넘길 수 있는
//! `{"data": [...], "layout": {...}}` 형태의 JSON 값을 만듭니다.
//! Decimal 값은 차트 축에서 숫자로 다뤄지도록 f64로 변환합니다.

use folio_analytics::PortfolioView;
use folio_core::ValuationPoint;
use folio_data::LogStore;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{json, Value};

/// 차트 트레이스 색상 팔레트.
const PALETTE: [&str; 7] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#34495e",
];

/// 자산 배분 도넛 차트.
///
/// 평가액이 0보다 큰 보유 종목과 현금으로 구성됩니다. 현금이 0이면
/// 현금 조각은 만들지 않습니다.
pub fn allocation_pie(view: &PortfolioView) -> Value {
    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<f64> = Vec::new();

    for holding in &view.holdings {
        if holding.value > rust_decimal::Decimal::ZERO {
            labels.push(holding.ticker.clone());
            values.push(holding.value.to_f64().unwrap_or(0.0));
        }
    }
    if view.cash > rust_decimal::Decimal::ZERO {
        labels.push("Cash".to_string());
        values.push(view.cash.to_f64().unwrap_or(0.0));
    }

    let colors: Vec<&str> = PALETTE.iter().take(labels.len()).copied().collect();

    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
            "marker": {"colors": colors},
            "textinfo": "label+percent",
            "hole": 0.4
        }],
        "layout": {
            "showlegend": true,
            "height": 350,
            "margin": {"t": 20, "b": 20, "l": 20, "r": 20}
        }
    })
}

/// 포트폴리오 평가액 추이 차트.
pub fn value_timeline(valuations: &[ValuationPoint]) -> Value {
    let x: Vec<String> = valuations
        .iter()
        .map(|p| p.bucket_time.format("%Y-%m-%d %H:%M").to_string())
        .collect();
    let y: Vec<f64> = valuations
        .iter()
        .map(|p| p.total_value.to_f64().unwrap_or(0.0))
        .collect();

    json!({
        "data": [{
            "type": "scatter",
            "mode": "lines+markers",
            "x": x,
            "y": y,
            "line": {"color": "#3498db", "width": 3},
            "marker": {"size": 8}
        }],
        "layout": {
            "xaxis": {"title": "Time"},
            "yaxis": {"title": "Portfolio Value ($)"},
            "height": 350,
            "margin": {"t": 20, "b": 50, "l": 60, "r": 20}
        }
    })
}

/// 추적 종목별 종가 추이 차트.
///
/// 종가 관측이 하나도 없는 종목은 트레이스를 만들지 않습니다.
pub fn price_lines(store: &LogStore, tickers: &[String]) -> Value {
    let mut traces: Vec<Value> = Vec::new();

    for (i, ticker) in tickers.iter().enumerate() {
        let observations: Vec<(String, f64)> = store
            .records()
            .iter()
            .filter(|r| &r.ticker == ticker)
            .filter_map(|r| {
                let close = r.close?.to_f64()?;
                Some((r.timestamp.format("%Y-%m-%d %H:%M").to_string(), close))
            })
            .collect();
        if observations.is_empty() {
            continue;
        }

        let (x, y): (Vec<String>, Vec<f64>) = observations.into_iter().unzip();
        traces.push(json!({
            "type": "scatter",
            "mode": "lines",
            "name": ticker,
            "x": x,
            "y": y,
            "line": {"color": PALETTE[i % PALETTE.len()], "width": 2.5}
        }));
    }

    json!({
        "data": traces,
        "layout": {
            "xaxis": {"title": "Time"},
            "yaxis": {"title": "Stock Price ($)"},
            "height": 350,
            "margin": {"t": 20, "b": 50, "l": 60, "r": 20},
            "showlegend": true
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use folio_analytics::Holding;
    use folio_core::LogRecord;
    use rust_decimal_macros::dec;

    fn sample_view() -> PortfolioView {
        PortfolioView {
            holdings: vec![Holding {
                ticker: "AAPL".to_string(),
                shares: 10,
                price: dec!(150),
                value: dec!(1500),
                weight_pct: dec!(23.08),
            }],
            cash: dec!(5000),
            total_stock_value: dec!(1500),
            total_portfolio_value: dec!(6500),
            total_pnl: dec!(-3500),
            pnl_percent: dec!(-35),
            as_of: None,
        }
    }

    #[test]
    fn test_pie_includes_cash_slice() {
        let chart = allocation_pie(&sample_view());
        let labels = chart["data"][0]["labels"].as_array().unwrap();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1], "Cash");
        assert_eq!(chart["data"][0]["hole"], 0.4);
    }

    #[test]
    fn test_pie_skips_zero_cash() {
        let mut view = sample_view();
        view.cash = dec!(0);
        let chart = allocation_pie(&view);
        let labels = chart["data"][0]["labels"].as_array().unwrap();

        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0], "AAPL");
    }

    #[test]
    fn test_timeline_points() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let points = vec![
            ValuationPoint::new(ts, dec!(10000)),
            ValuationPoint::new(ts + chrono::Duration::hours(1), dec!(10100)),
        ];
        let chart = value_timeline(&points);

        assert_eq!(chart["data"][0]["x"][0], "2024-03-15 09:00");
        assert_eq!(chart["data"][0]["y"][1], 10100.0);
    }

    #[test]
    fn test_price_lines_skip_unobserved_tickers() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let store = LogStore::from_records(vec![LogRecord::observation(ts, "AAPL", dec!(150))]);
        let tickers = vec!["AAPL".to_string(), "MSFT".to_string()];

        let chart = price_lines(&store, &tickers);
        let traces = chart["data"].as_array().unwrap();

        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0]["name"], "AAPL");
    }
}
