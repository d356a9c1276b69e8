//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::{read_csv_chart, CsvAdapter};
use crate::adapters::csv_table_adapter::CsvTableAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_file_adapter::{read_market_chart, JsonFileAdapter};
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::{
    validate_analysis_config, validate_market_config, validate_web_config, SourceKind,
};
use crate::domain::error::AnalysisError;
use crate::domain::params::{normalize_coin_id, AnalysisParams, MarketQuery};
use crate::domain::pipeline::{analyze, Analysis};
use crate::domain::sample::MarketChart;
use crate::domain::signal::SignalThresholds;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "coinscope", about = "Crypto market flow and momentum analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse one coin and print the summary
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Read a saved market chart (.json) or table (.csv) instead of the configured source
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long)]
        coin: Option<String>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also export the aligned table as CSV
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Options of one `analyze` invocation.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub coin: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub table: Option<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            config,
            input,
            coin,
            format,
            output,
            table,
        } => execute_analyze(&AnalyzeOptions {
            config,
            input,
            coin,
            format,
            output,
            table,
        })
        .map(|_| ()),
        Command::Validate { config } => run_validate(&config),
        Command::Serve { config } => run_serve(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, AnalysisError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| AnalysisError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Without a path every setting takes its default.
pub fn load_optional_config(path: Option<&Path>) -> Result<FileConfigAdapter, AnalysisError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(FileConfigAdapter::empty()),
    }
}

fn get_period(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, AnalysisError> {
    let value = config.get_int("indicators", key, default as i64);
    usize::try_from(value)
        .map_err(|_| AnalysisError::config_invalid("indicators", key, format!("{key} must be at least 1")))
}

pub fn build_analysis_params(config: &dyn ConfigPort) -> Result<AnalysisParams, AnalysisError> {
    validate_analysis_config(config)?;
    let defaults = AnalysisParams::default();
    let params = AnalysisParams {
        rsi_period: get_period(config, "rsi_period", defaults.rsi_period)?,
        macd_fast: get_period(config, "macd_fast", defaults.macd_fast)?,
        macd_slow: get_period(config, "macd_slow", defaults.macd_slow)?,
        macd_signal: get_period(config, "macd_signal", defaults.macd_signal)?,
        short_volume_window: get_period(config, "short_volume_window", defaults.short_volume_window)?,
        thresholds: SignalThresholds {
            oversold: config.get_double("signal", "oversold", defaults.thresholds.oversold),
            overbought: config.get_double("signal", "overbought", defaults.thresholds.overbought),
        },
    };
    params.validate()?;
    Ok(params)
}

pub fn build_market_query(
    config: &dyn ConfigPort,
    coin_override: Option<&str>,
) -> Result<MarketQuery, AnalysisError> {
    validate_market_config(config)?;
    let defaults = MarketQuery::default();

    let coin_id = match coin_override.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => normalize_coin_id(c)?,
        None => match config.get_string("market", "coin_id") {
            Some(c) => normalize_coin_id(&c)?,
            None => defaults.coin_id,
        },
    };
    let vs_currency = config
        .get_string("market", "vs_currency")
        .map(|c| c.trim().to_lowercase())
        .unwrap_or(defaults.vs_currency);
    let days = config.get_int("market", "days", i64::from(defaults.days));
    let days = u32::try_from(days)
        .map_err(|_| AnalysisError::config_invalid("market", "days", "days is out of range"))?;

    Ok(MarketQuery {
        coin_id,
        vs_currency,
        days,
    })
}

pub fn resolve_source(config: &dyn ConfigPort) -> Result<SourceKind, AnalysisError> {
    match config.get_string("market", "source") {
        Some(s) => s.parse(),
        None => Ok(SourceKind::Json),
    }
}

pub fn build_market_data_port(
    config: &dyn ConfigPort,
) -> Result<Box<dyn MarketDataPort + Send + Sync>, AnalysisError> {
    let data_dir = PathBuf::from(
        config
            .get_string("market", "data_dir")
            .unwrap_or_else(|| ".".to_string()),
    );

    match resolve_source(config)? {
        SourceKind::Json => Ok(Box::new(JsonFileAdapter::new(data_dir))),
        SourceKind::Csv => Ok(Box::new(CsvAdapter::new(data_dir))),
        #[cfg(feature = "http")]
        SourceKind::CoinGecko => Ok(Box::new(
            crate::adapters::coingecko_adapter::CoinGeckoAdapter::from_config(config)?,
        )),
        #[cfg(not(feature = "http"))]
        SourceKind::CoinGecko => Err(AnalysisError::config_invalid(
            "market",
            "source",
            "the coingecko source requires the http feature",
        )),
    }
}

/// Decode a single input file; the extension picks the format.
pub fn read_input_file(path: &Path) -> Result<MarketChart, AnalysisError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("json") => read_market_chart(path),
        Some("csv") => read_csv_chart(path),
        _ => Err(AnalysisError::invalid_input(format!(
            "unsupported input file {} (expected .json or .csv)",
            path.display()
        ))),
    }
}

fn path_arg(path: Option<&PathBuf>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn execute_analyze(opts: &AnalyzeOptions) -> Result<Analysis, AnalysisError> {
    let config = load_optional_config(opts.config.as_deref())?;
    let params = build_analysis_params(&config)?;
    let query = build_market_query(&config, opts.coin.as_deref())?;

    let chart = match &opts.input {
        Some(path) => {
            info!("Reading market data from {}", path.display());
            read_input_file(path)?
        }
        None => {
            let port = build_market_data_port(&config)?;
            info!(
                "Fetching {} ({}, {} days) from {}",
                query.coin_id,
                query.vs_currency,
                query.days,
                port.source_name()
            );
            port.fetch_market_chart(&query)?
        }
    };

    let analysis = analyze(&chart, &params, Utc::now())?;
    info!(
        "Analysed {} rows, signal {}",
        analysis.summary.rows, analysis.summary.signal
    );

    let reporter: &dyn ReportPort = match opts.format {
        OutputFormat::Text => &TextReportAdapter,
        OutputFormat::Json => &JsonReportAdapter,
    };
    reporter.write(&analysis, &query.coin_id, &path_arg(opts.output.as_ref()))?;

    if let Some(table) = &opts.table {
        CsvTableAdapter.write(&analysis, &query.coin_id, &table.display().to_string())?;
        info!("Table written to {}", table.display());
    }

    Ok(analysis)
}

pub fn run_validate(config_path: &Path) -> Result<(), AnalysisError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;
    println!("OK");
    Ok(())
}

/// Every check `validate` performs, without touching the filesystem.
pub fn validate_config(config: &dyn ConfigPort) -> Result<(), AnalysisError> {
    validate_market_config(config)?;
    validate_web_config(config)?;
    build_analysis_params(config)?;
    build_market_query(config, None)?;
    resolve_source(config)?;
    Ok(())
}

/// `[web] host` and `port`, with the `PORT` environment variable taking
/// precedence over the configured port.
pub fn resolve_listen_addr(
    config: &dyn ConfigPort,
    env_port: Option<&str>,
) -> Result<String, AnalysisError> {
    validate_web_config(config)?;
    let host = config
        .get_string("web", "host")
        .unwrap_or_else(|| "0.0.0.0".to_string());

    let port = match env_port {
        Some(p) => p
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| AnalysisError::config_invalid("web", "port", format!("invalid PORT '{p}'")))?,
        None => config.get_int("web", "port", 8080) as u16,
    };
    Ok(format!("{host}:{port}"))
}

fn run_serve(config_path: &Path) -> Result<(), AnalysisError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::sync::Arc;

        let config = load_config(config_path)?;
        validate_config(&config)?;

        let state = AppState {
            market_data: Arc::from(build_market_data_port(&config)?),
            query: build_market_query(&config, None)?,
            params: build_analysis_params(&config)?,
        };
        let env_port = std::env::var("PORT").ok();
        let addr = resolve_listen_addr(&config, env_port.as_deref())?;
        let router = build_router(state);

        info!("Starting web server on {}", addr);
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await
        })?;
        Ok(())
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        Err(AnalysisError::config_invalid(
            "web",
            "serve",
            "the web feature is required for serve",
        ))
    }
}
