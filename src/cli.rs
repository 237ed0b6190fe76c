//! CLI definition and dispatch.
//!
//! Each subcommand resolves an [`AnalysisConfig`], builds its adapters and
//! hands them to a pipeline function. Pipelines take ports as trait objects
//! so tests can drive them with in-memory data.

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

use crate::adapters::console_report;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::domain::accumulation::{run_dca, run_momentum, AccumulationResult};
use crate::domain::backtest::{run_universe, BacktestTrace};
use crate::domain::config::{AnalysisConfig, DataSource};
use crate::domain::config_validation::validate_analysis_config;
use crate::domain::error::TraderError;
use crate::domain::metrics::{PerformanceRecord, RiskMetrics};
use crate::domain::monthly::{resample_monthly, MonthlyBar};
use crate::domain::universe::{load_series, load_universe, parse_tickers};
use crate::ports::chart_port::{ChartPort, ChartSeries};
use crate::ports::data_port::DataPort;

pub const MA_RSI_CHART: &str = "ma_rsi_backtest";
pub const METRICS_CHART: &str = "performance_metrics";
pub const ACCUMULATION_CHART: &str = "accumulation";

const PREVIEW_ROWS: usize = 5;

#[derive(Parser, Debug)]
#[command(
    name = "trendtrader",
    about = "MA-RSI and dollar-cost-averaging strategy backtester"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest the MA-RSI strategy over the configured tickers
    MaRsi {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated tickers, replacing [analysis] tickers
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        no_charts: bool,
    },
    /// Compare monthly DCA with the momentum-filtered variant
    Dca {
        #[arg(short, long)]
        config: PathBuf,
        /// Replaces [dca] ticker
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        no_charts: bool,
    },
    /// Validate a configuration file and print the resolved settings
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(&e)
        }
    }
}

/// Dispatches a parsed command. `run` maps the error to the process exit code
/// through [`TraderError::exit_code`].
pub fn execute(cli: Cli) -> Result<(), TraderError> {
    match cli.command {
        Command::MaRsi {
            config,
            ticker,
            output,
            no_charts,
        } => run_ma_rsi(&config, ticker.as_deref(), output, no_charts),
        Command::Dca {
            config,
            ticker,
            output,
            no_charts,
        } => run_dca_command(&config, ticker.as_deref(), output, no_charts),
        Command::Validate { config } => run_validate(&config),
    }
}

/// Reads, resolves and validates the configuration file.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, TraderError> {
    info!(path = %path.display(), "loading config");
    let adapter = FileConfigAdapter::from_file(path)?;
    let config = AnalysisConfig::from_port(&adapter)?;
    validate_analysis_config(&config)?;
    Ok(config)
}

pub fn build_data_port(source: &DataSource) -> Result<Box<dyn DataPort>, TraderError> {
    match source {
        DataSource::Csv { directory } => Ok(Box::new(CsvAdapter::new(directory.clone()))),
        #[cfg(feature = "yahoo")]
        DataSource::Yahoo => Ok(Box::new(
            crate::adapters::yahoo_adapter::YahooAdapter::new()?,
        )),
        #[cfg(not(feature = "yahoo"))]
        DataSource::Yahoo => Err(TraderError::invalid(
            "data",
            "source",
            "yahoo source requires building with the `yahoo` feature",
        )),
    }
}

fn chart_adapter(config: &AnalysisConfig, no_charts: bool) -> Option<SvgChartAdapter> {
    (config.charts && !no_charts).then(|| SvgChartAdapter::new(config.output_dir.clone()))
}

fn run_ma_rsi(
    config_path: &Path,
    ticker_override: Option<&str>,
    output_override: Option<PathBuf>,
    no_charts: bool,
) -> Result<(), TraderError> {
    let mut config = load_config(config_path)?;
    if let Some(tickers) = ticker_override {
        config.tickers = parse_tickers(tickers)
            .map_err(|e| TraderError::invalid("analysis", "tickers", e.to_string()))?;
    }
    if let Some(output) = output_override {
        config.output_dir = output;
    }

    let data_port = build_data_port(&config.data_source)?;
    let charts = chart_adapter(&config, no_charts);
    let report = run_ma_rsi_pipeline(
        data_port.as_ref(),
        charts.as_ref().map(|c| c as &dyn ChartPort),
        &config,
    )?;

    for (ticker, trace) in &report.traces {
        println!("{}", console_report::format_backtest_summary(ticker, trace));
    }
    if let Some((ticker, trace)) = &report.benchmark {
        println!(
            "{}",
            console_report::format_backtest_summary(&format!("{} (benchmark)", ticker), trace)
        );
    }
    println!();
    print!("{}", console_report::format_metrics_table(&report.records));
    Ok(())
}

fn run_dca_command(
    config_path: &Path,
    ticker_override: Option<&str>,
    output_override: Option<PathBuf>,
    no_charts: bool,
) -> Result<(), TraderError> {
    let mut config = load_config(config_path)?;
    if let Some(ticker) = ticker_override {
        config.dca_ticker = ticker.trim().to_uppercase();
    }
    if let Some(output) = output_override {
        config.output_dir = output;
    }

    let data_port = build_data_port(&config.data_source)?;
    let charts = chart_adapter(&config, no_charts);
    let report = run_dca_pipeline(
        data_port.as_ref(),
        charts.as_ref().map(|c| c as &dyn ChartPort),
        &config,
    )?;

    println!(
        "{}",
        console_report::format_coverage(report.first_date, report.last_date)
    );
    println!(
        "{}",
        console_report::format_strategy_line("DCA Strategy", &report.dca)
    );
    println!(
        "{}",
        console_report::format_strategy_line("Momentum Strategy", &report.momentum)
    );
    println!(
        "{}",
        console_report::format_deployment_line("Momentum Strategy", &report.momentum)
    );
    println!("{}", console_report::format_risk_line(&report.risk));
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), TraderError> {
    let config = load_config(config_path)?;

    let source = match &config.data_source {
        DataSource::Csv { directory } => format!("csv ({})", directory.display()),
        DataSource::Yahoo => "yahoo".to_string(),
    };
    let strategy = &config.strategy;

    println!("Config is valid.");
    println!("  Data source:        {}", source);
    println!("  Tickers:            {}", config.tickers.join(", "));
    println!(
        "  Benchmark:          {}",
        config.benchmark.as_deref().unwrap_or("none")
    );
    println!(
        "  Date range:         {} to {} (end exclusive)",
        config.start_date, config.end_date
    );
    println!("  Initial capital:    {:.2}", config.initial_capital);
    println!(
        "  MA-RSI:             MA({}) RSI({}) buy < {} sell > {}",
        strategy.ma_window,
        strategy.rsi_window,
        strategy.rsi_buy_threshold,
        strategy.rsi_sell_threshold
    );
    println!(
        "  DCA:                {} at {:.2}/month, momentum lookback {}",
        config.dca_ticker, config.monthly_investment, config.momentum_lookback
    );
    println!("  Output directory:   {}", config.output_dir.display());
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaRsiReport {
    pub traces: BTreeMap<String, BacktestTrace>,
    pub benchmark: Option<(String, BacktestTrace)>,
    pub records: BTreeMap<String, PerformanceRecord>,
}

/// Fetch, signal, simulate and score every configured ticker. The benchmark
/// runs through the same strategy but is kept out of `traces` and `records`
/// unless it is also listed as a ticker.
pub fn run_ma_rsi_pipeline(
    data_port: &dyn DataPort,
    chart_port: Option<&dyn ChartPort>,
    config: &AnalysisConfig,
) -> Result<MaRsiReport, TraderError> {
    // Short histories are valid: their undefined-indicator dates just hold.
    let universe = load_universe(
        data_port,
        &config.all_tickers(),
        config.start_date,
        config.end_date,
        1,
    )?;
    let warmup = config.strategy.warmup();
    for (ticker, series) in &universe {
        if series.len() <= warmup {
            warn!(
                ticker = ticker.as_str(),
                bars = series.len(),
                warmup,
                "indicators never defined, trace will stay in cash"
            );
        }
    }

    info!(
        tickers = universe.len(),
        strategy = %config.strategy,
        "running MA-RSI backtest"
    );
    let mut traces = run_universe(&universe, &config.strategy, config.initial_capital);

    let benchmark = config.benchmark.as_ref().and_then(|b| {
        let trace = if config.tickers.contains(b) {
            traces.get(b).cloned()
        } else {
            traces.remove(b)
        };
        trace.map(|t| (b.clone(), t))
    });

    for (ticker, trace) in &traces {
        debug!(
            ticker = ticker.as_str(),
            transitions = trace.transitions(),
            final_value = trace.final_value().unwrap_or(f64::NAN),
            "backtest complete"
        );
    }

    let records = PerformanceRecord::compute_universe(&traces);

    if let Some(charts) = chart_port {
        let mut series: Vec<ChartSeries> = traces
            .iter()
            .map(|(ticker, trace)| ChartSeries::solid(ticker.clone(), trace.equity_curve()))
            .collect();
        if let Some((ticker, trace)) = &benchmark {
            series.push(ChartSeries::dashed(
                format!("{} (benchmark)", ticker),
                trace.equity_curve(),
            ));
        }
        charts.plot_portfolio_values(MA_RSI_CHART, "MA-RSI Strategy Backtest Results", &series)?;
        charts.plot_metrics(METRICS_CHART, &records)?;
    }

    Ok(MaRsiReport {
        traces,
        benchmark,
        records,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DcaReport {
    pub ticker: String,
    pub first_date: chrono::NaiveDate,
    pub last_date: chrono::NaiveDate,
    pub monthly: Vec<MonthlyBar>,
    pub dca: AccumulationResult,
    pub momentum: AccumulationResult,
    pub risk: RiskMetrics,
}

/// Plain DCA against the momentum-filtered variant on month-end prices.
/// Risk metrics pair the DCA portfolio's drawdown with the underlying's
/// monthly return statistics.
pub fn run_dca_pipeline(
    data_port: &dyn DataPort,
    chart_port: Option<&dyn ChartPort>,
    config: &AnalysisConfig,
) -> Result<DcaReport, TraderError> {
    let ticker = config.dca_ticker.as_str();
    let series = load_series(data_port, ticker, config.start_date, config.end_date, 1)?;

    let (Some(first_date), Some(last_date)) = (series.first_date(), series.last_date()) else {
        return Err(TraderError::NoData {
            ticker: ticker.to_string(),
        });
    };
    info!(ticker, %first_date, %last_date, "data coverage");

    let monthly = resample_monthly(&series);
    if monthly.is_empty() {
        return Err(TraderError::InsufficientData {
            ticker: ticker.to_string(),
            bars: series.len(),
            minimum: 2,
        });
    }
    if monthly.len() < config.momentum_lookback {
        warn!(
            ticker,
            months = monthly.len(),
            lookback = config.momentum_lookback,
            "momentum is never defined, momentum strategy will not invest"
        );
    }

    debug!(
        "head:\n{}",
        console_report::format_monthly_rows(&monthly[..monthly.len().min(PREVIEW_ROWS)])
    );
    debug!(
        "tail:\n{}",
        console_report::format_monthly_rows(&monthly[monthly.len().saturating_sub(PREVIEW_ROWS)..])
    );

    let dca = run_dca(&monthly, config.monthly_investment);
    let momentum = run_momentum(&monthly, config.momentum_lookback, config.monthly_investment);

    let monthly_returns: Vec<f64> = monthly.iter().map(|b| b.monthly_return).collect();
    let risk = RiskMetrics::compute(&monthly_returns, &dca.portfolio_values());

    if let Some(charts) = chart_port {
        let series = [
            ChartSeries::solid("DCA Strategy", dca.equity_curve()),
            ChartSeries::solid("Momentum Strategy", momentum.equity_curve()),
        ];
        charts.plot_portfolio_values(
            ACCUMULATION_CHART,
            &format!("{} Investment Strategies Performance", ticker),
            &series,
        )?;
    }

    Ok(DcaReport {
        ticker: ticker.to_string(),
        first_date,
        last_date,
        monthly,
        dca,
        momentum,
        risk,
    })
}
