//! Inline SVG chart of the analysed table.
//!
//! Price, market cap, RSI, MACD and the MACD signal line are drawn on one
//! plot. Each series is min-max normalized to its own range, so the chart
//! shows shape and crossings rather than absolute values.

use crate::domain::alignment::AlignedRow;
use crate::domain::indicator::IndicatorType;
use crate::domain::params::AnalysisParams;

const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 40.0;

struct Line {
    label: String,
    color: &'static str,
    values: Vec<f64>,
}

/// Map values onto [0, 1]. A flat series sits at 0.5.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|v| if range > 0.0 { (v - min) / range } else { 0.5 })
        .collect()
}

fn path_data(normalized: &[f64]) -> String {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let steps = (normalized.len() - 1).max(1) as f64;

    let mut data = String::new();
    for (i, v) in normalized.iter().enumerate() {
        let x = MARGIN_LEFT + (i as f64 / steps) * plot_width;
        let y = MARGIN_TOP + plot_height - v * plot_height;
        if i == 0 {
            data.push_str(&format!("M {:.1} {:.1}", x, y));
        } else {
            data.push_str(&format!(" L {:.1} {:.1}", x, y));
        }
    }
    data
}

/// Render the table as an `<svg>` element. Returns an empty string for an
/// empty table.
pub fn generate_market_svg(table: &[AlignedRow], params: &AnalysisParams) -> String {
    if table.is_empty() {
        return String::new();
    }

    let column = |f: fn(&AlignedRow) -> f64| table.iter().map(f).collect::<Vec<f64>>();
    let macd_spans = (params.macd_fast, params.macd_slow, params.macd_signal);
    let lines = [
        Line {
            label: "Price".to_string(),
            color: "#2563eb",
            values: column(|r| r.price),
        },
        Line {
            label: "Market Cap".to_string(),
            color: "#16a34a",
            values: column(|r| r.market_cap),
        },
        Line {
            label: IndicatorType::Rsi(params.rsi_period).to_string(),
            color: "#9333ea",
            values: column(|r| r.rsi),
        },
        Line {
            label: IndicatorType::Macd {
                fast: macd_spans.0,
                slow: macd_spans.1,
                signal: macd_spans.2,
            }
            .to_string(),
            color: "#ea580c",
            values: column(|r| r.macd),
        },
        Line {
            label: IndicatorType::MacdSignal {
                fast: macd_spans.0,
                slow: macd_spans.1,
                signal: macd_spans.2,
            }
            .to_string(),
            color: "#dc2626",
            values: column(|r| r.macd_signal),
        },
    ];

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        CHART_WIDTH, CHART_HEIGHT, CHART_WIDTH, CHART_HEIGHT
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM,
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));

    for (i, line) in lines.iter().enumerate() {
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"/>\n",
            path_data(&normalize(&line.values)),
            line.color
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.0}\" y=\"18\" font-size=\"11\" fill=\"{}\">{}</text>\n",
            MARGIN_LEFT + i as f64 * 140.0,
            line.color,
            line.label
        ));
    }

    let first = table[0].timestamp.format("%Y-%m-%d %H:%M");
    let last = table[table.len() - 1].timestamp.format("%Y-%m-%d %H:%M");
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM + 15.0,
        first
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - MARGIN_BOTTOM + 15.0,
        last
    ));
    svg.push_str("</svg>");
    svg
}
