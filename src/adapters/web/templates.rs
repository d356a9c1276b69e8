//! HTML templates using Askama.

use askama::Template;

use crate::adapters::format::{percent, ratio, usd};
use crate::adapters::text_report_adapter::display_name;
use crate::domain::indicator::IndicatorType;
use crate::domain::params::AnalysisParams;
use crate::domain::signal::Signal;
use crate::domain::summary::Summary;

/// Summary fields preformatted for display.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub coin_id: String,
    pub title: String,
    pub price: String,
    pub market_cap: String,
    pub volume_percent_mc: String,
    pub total_inflow: String,
    pub total_outflow: String,
    pub volume_ratio: String,
    pub rsi_label: String,
    pub rsi: String,
    pub macd_label: String,
    pub macd: String,
    pub macd_signal: String,
    pub signal: String,
    pub signal_class: &'static str,
    pub rows: usize,
    pub computed_at: String,
}

impl SummaryView {
    pub fn new(coin_id: &str, summary: &Summary, params: &AnalysisParams) -> Self {
        let signal_class = match summary.signal {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        };
        Self {
            coin_id: coin_id.to_string(),
            title: format!("{} Analysis", display_name(coin_id)),
            price: usd(summary.price, 2),
            market_cap: usd(summary.market_cap, 0),
            volume_percent_mc: percent(summary.volume_percent_mc),
            total_inflow: usd(summary.total_inflow, 0),
            total_outflow: usd(summary.total_outflow, 0),
            volume_ratio: ratio(summary.volume_ratio),
            rsi_label: IndicatorType::Rsi(params.rsi_period).to_string(),
            rsi: format!("{:.2}", summary.rsi),
            macd_label: IndicatorType::Macd {
                fast: params.macd_fast,
                slow: params.macd_slow,
                signal: params.macd_signal,
            }
            .to_string(),
            macd: format!("{:.4}", summary.macd),
            macd_signal: format!("{:.4}", summary.macd_signal),
            signal: summary.signal.to_string(),
            signal_class,
            rows: summary.rows,
            computed_at: summary.computed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub view: &'a SummaryView,
    pub chart_svg: &'a str,
}

#[derive(Template)]
#[template(path = "summary.html")]
pub struct SummaryTemplate<'a> {
    pub view: &'a SummaryView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn summary(signal: Signal) -> Summary {
        Summary {
            price: 64_210.554,
            market_cap: 1_250_000_000_000.0,
            volume_percent_mc: 2.346,
            total_inflow: 1_234.4,
            total_outflow: 987.6,
            volume_ratio: 1.049,
            signal,
            rsi: 55.199,
            macd: 12.34567,
            macd_signal: 10.12344,
            rows: 721,
            computed_at: DateTime::from_timestamp(1_760_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn view_formats_fields() {
        let view = SummaryView::new("bitcoin", &summary(Signal::Hold), &AnalysisParams::default());
        assert_eq!(view.title, "Bitcoin Analysis");
        assert_eq!(view.price, "$64,210.55");
        assert_eq!(view.market_cap, "$1,250,000,000,000");
        assert_eq!(view.volume_percent_mc, "2.35%");
        assert_eq!(view.total_inflow, "$1,234");
        assert_eq!(view.total_outflow, "$988");
        assert_eq!(view.volume_ratio, "1.05");
        assert_eq!(view.rsi_label, "RSI(14)");
        assert_eq!(view.macd_label, "MACD(12,26,9)");
        assert_eq!(view.computed_at, "2025-10-09 08:53 UTC");
    }

    #[test]
    fn signal_class_matches_signal() {
        let params = AnalysisParams::default();
        assert_eq!(SummaryView::new("x", &summary(Signal::Buy), &params).signal_class, "buy");
        assert_eq!(SummaryView::new("x", &summary(Signal::Sell), &params).signal_class, "sell");
    }

    #[test]
    fn summary_fragment_renders() {
        let view = SummaryView::new("bitcoin", &summary(Signal::Sell), &AnalysisParams::default());
        let html = SummaryTemplate { view: &view }.render().unwrap();
        assert!(html.contains("$64,210.55"));
        assert!(html.contains("Sell"));
        assert!(!html.contains("<html"));
    }

    #[test]
    fn dashboard_embeds_chart_unescaped() {
        let view = SummaryView::new("bitcoin", &summary(Signal::Hold), &AnalysisParams::default());
        let html = DashboardTemplate {
            view: &view,
            chart_svg: "<svg id=\"chart\"></svg>",
        }
        .render()
        .unwrap();
        assert!(html.contains("<html"));
        assert!(html.contains("<svg id=\"chart\"></svg>"));
        assert!(html.contains("Bitcoin Analysis"));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = ErrorTemplate {
            message: "<script>",
            status: 502,
        }
        .render()
        .unwrap();
        assert!(html.contains("502"));
        assert!(!html.contains("<script>"));
    }
}
