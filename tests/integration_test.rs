//! End-to-end analysis through the ports.
//!
//! Tests cover:
//! - Fetch through a MarketDataPort, analyse, summarize
//! - File adapters (JSON, CSV) feeding the same pipeline
//! - Misaligned series handled by alignment
//! - Report adapters writing the result

mod common;

use approx::assert_relative_eq;
use chrono::DateTime;
use coinscope::adapters::csv_adapter::CsvAdapter;
use coinscope::adapters::csv_table_adapter::CsvTableAdapter;
use coinscope::adapters::json_file_adapter::JsonFileAdapter;
use coinscope::adapters::json_report_adapter::JsonReportAdapter;
use coinscope::adapters::text_report_adapter::TextReportAdapter;
use coinscope::domain::error::AnalysisError;
use coinscope::domain::params::{AnalysisParams, MarketQuery};
use coinscope::domain::pipeline::{analyze, Analysis};
use coinscope::domain::sample::{MarketChart, Sample};
use coinscope::domain::signal::Signal;
use coinscope::ports::market_data_port::MarketDataPort;
use coinscope::ports::report_port::ReportPort;
use common::*;
use std::fs;

fn query(coin: &str) -> MarketQuery {
    MarketQuery {
        coin_id: coin.to_string(),
        ..MarketQuery::default()
    }
}

fn run(port: &dyn MarketDataPort, coin: &str) -> Result<Analysis, AnalysisError> {
    let chart = port.fetch_market_chart(&query(coin))?;
    let now = DateTime::from_timestamp(1_800_000_000, 0).unwrap();
    analyze(&chart, &AnalysisParams::default(), now)
}

mod port_pipeline {
    use super::*;

    #[test]
    fn three_row_scenario_through_mock_port() {
        let port = MockMarketDataPort::new().with_chart("bitcoin", three_row_chart());
        let analysis = run(&port, "bitcoin").unwrap();

        let changes: Vec<f64> = analysis.table.iter().map(|r| r.price_change).collect();
        assert_eq!(changes[0], 0.0);
        assert_relative_eq!(changes[1], 0.10, epsilon = 1e-12);
        assert_relative_eq!(changes[2], -0.10, epsilon = 1e-12);
        assert_relative_eq!(analysis.summary.total_inflow, 11.0, epsilon = 1e-9);
        assert_relative_eq!(analysis.summary.total_outflow, 9.9, epsilon = 1e-9);
        assert_relative_eq!(analysis.summary.volume_percent_mc, 1.0, epsilon = 1e-12);
        assert_eq!(port.query_count(), 1);
    }

    #[test]
    fn port_error_propagates() {
        let port = MockMarketDataPort::new().with_error("bitcoin", "rate limit");
        let err = run(&port, "bitcoin").unwrap_err();
        assert!(matches!(err, AnalysisError::DataSource { ref reason } if reason == "rate limit"));
    }

    #[test]
    fn unknown_coin_is_data_source_error() {
        let port = MockMarketDataPort::new();
        assert!(matches!(
            run(&port, "dogecoin"),
            Err(AnalysisError::DataSource { .. })
        ));
    }

    #[test]
    fn decelerating_rally_ends_in_sell() {
        let port =
            MockMarketDataPort::new().with_chart("bitcoin", chart_from_prices(&decelerating_rally()));
        let analysis = run(&port, "bitcoin").unwrap();
        assert_eq!(analysis.summary.signal, Signal::Sell);
        assert!(analysis.summary.rsi > 70.0);
    }

    #[test]
    fn decelerating_selloff_ends_in_buy() {
        let port =
            MockMarketDataPort::new().with_chart("bitcoin", chart_from_prices(&decelerating_selloff()));
        let analysis = run(&port, "bitcoin").unwrap();
        assert_eq!(analysis.summary.signal, Signal::Buy);
        assert!(analysis.summary.rsi < 30.0);
    }

    #[test]
    fn steady_rally_is_never_buy() {
        let prices = rising_prices(40, 100.0, 1.0);
        let port = MockMarketDataPort::new().with_chart("bitcoin", chart_from_prices(&prices));
        let analysis = run(&port, "bitcoin").unwrap();
        assert!(analysis.table.iter().all(|r| r.signal != Signal::Buy));
        assert!(analysis.summary.rsi > 99.0);
    }

    #[test]
    fn misaligned_series_are_forward_filled() {
        let chart = MarketChart {
            prices: vec![Sample(T0, 100.0), Sample(T0 + 2 * HOUR, 102.0)],
            total_volumes: vec![Sample(T0 + HOUR, 500.0)],
            market_caps: vec![Sample(T0, 10_000.0), Sample(T0 + 2 * HOUR, 10_200.0)],
        };
        let port = MockMarketDataPort::new().with_chart("bitcoin", chart);
        let analysis = run(&port, "bitcoin").unwrap();

        assert_eq!(analysis.table.len(), 3);
        let row0 = &analysis.table[0];
        assert_eq!((row0.price, row0.volume, row0.market_cap), (100.0, 0.0, 10_000.0));
        let row1 = &analysis.table[1];
        assert_eq!((row1.price, row1.volume, row1.market_cap), (100.0, 500.0, 10_000.0));
        let row2 = &analysis.table[2];
        assert_eq!((row2.price, row2.volume, row2.market_cap), (102.0, 500.0, 10_200.0));
    }

    #[test]
    fn empty_prices_fail_without_summary() {
        let mut chart = three_row_chart();
        chart.prices.clear();
        let port = MockMarketDataPort::new().with_chart("bitcoin", chart);
        assert!(matches!(
            run(&port, "bitcoin"),
            Err(AnalysisError::InvalidInput { .. })
        ));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let port = MockMarketDataPort::new().with_chart("bitcoin", chart_from_prices(&decelerating_rally()));
        let a = run(&port, "bitcoin").unwrap();
        let b = run(&port, "bitcoin").unwrap();
        assert_eq!(a.table, b.table);
        assert_eq!(a.summary, b.summary);
    }
}

mod file_sources {
    use super::*;

    #[test]
    fn json_and_csv_sources_agree() {
        let dir = tempfile::TempDir::new().unwrap();
        let chart = three_row_chart();
        fs::write(dir.path().join("bitcoin.json"), chart_json(&chart)).unwrap();

        let mut csv = String::from("time,price,volume,market_cap\n");
        for i in 0..3 {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                chart.prices[i].0, chart.prices[i].1, chart.total_volumes[i].1, chart.market_caps[i].1
            ));
        }
        fs::write(dir.path().join("bitcoin.csv"), csv).unwrap();

        let from_json = run(&JsonFileAdapter::new(dir.path().to_path_buf()), "bitcoin").unwrap();
        let from_csv = run(&CsvAdapter::new(dir.path().to_path_buf()), "bitcoin").unwrap();
        assert_eq!(from_json.table, from_csv.table);
    }
}

mod reports {
    use super::*;

    #[test]
    fn all_report_adapters_write_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let port = MockMarketDataPort::new().with_chart("bitcoin", three_row_chart());
        let analysis = run(&port, "bitcoin").unwrap();

        let text_path = dir.path().join("summary.txt");
        let json_path = dir.path().join("summary.json");
        let table_path = dir.path().join("table.csv");

        TextReportAdapter
            .write(&analysis, "bitcoin", text_path.to_str().unwrap())
            .unwrap();
        JsonReportAdapter
            .write(&analysis, "bitcoin", json_path.to_str().unwrap())
            .unwrap();
        CsvTableAdapter
            .write(&analysis, "bitcoin", table_path.to_str().unwrap())
            .unwrap();

        let text = fs::read_to_string(&text_path).unwrap();
        assert!(text.contains("Bitcoin Analysis"));
        assert!(text.contains("$99.00"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["coin_id"], "bitcoin");
        assert_eq!(json["rows"], 3);

        let table = fs::read_to_string(&table_path).unwrap();
        assert_eq!(table.lines().count(), 4);
    }
}
