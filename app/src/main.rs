// In app/src/main.rs

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use app_config::Settings;
use backtester::Backtester;
use clap::{Parser, Subcommand};
use core_types::{Granularity, Instrument, PriceSeries};
use engine::{Assessor, ControlStep, TradeLight};
use market_data::{CandleFileProvider, MarketDataProvider};
use strategies::{StrategyFamily, current_signal};
use tracing_subscriber::prelude::*;

mod optimizer;
mod report;
mod strategy_factory;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Backtests, optimizes and assesses forex signal strategies.")]
struct Cli {
    /// Overrides the candle directory from settings.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a historical backtest of one strategy.
    Backtest {
        /// The instrument to backtest (e.g., "EUR_USD").
        #[arg(short, long)]
        instrument: String,

        /// The candle granularity (M1, H1, D or M).
        #[arg(short, long, default_value = "D")]
        granularity: Granularity,

        /// The strategy family (e.g., "rsi", "sma_crossover").
        #[arg(short, long)]
        family: StrategyFamily,

        /// Strategy parameters as name=value, repeatable.
        #[arg(short, long = "param")]
        params: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Sweeps parameter ranges and prints the best combinations.
    Optimize {
        #[arg(short, long)]
        instrument: String,

        #[arg(short, long, default_value = "D")]
        granularity: Granularity,

        /// Optimize a single family instead of every configured one.
        #[arg(short, long)]
        family: Option<StrategyFamily>,

        #[arg(long, default_value = "config/optimizer.toml")]
        config: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Optimizes every family, then ranks combined strategies of their leaders.
    Composite {
        #[arg(short, long)]
        instrument: String,

        #[arg(short, long, default_value = "D")]
        granularity: Granularity,

        #[arg(long, default_value = "config/optimizer.toml")]
        config: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Prints the strategy's signal on the latest bar.
    Signal {
        #[arg(short, long)]
        instrument: String,

        #[arg(short, long, default_value = "M1")]
        granularity: Granularity,

        #[arg(short, long)]
        family: StrategyFamily,

        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Runs the multi-granularity control step with the configured strategies.
    Assess {
        /// A single instrument; defaults to every configured instrument.
        #[arg(short, long)]
        instrument: Option<String>,

        /// The current trade light.
        #[arg(long, default_value = "red")]
        state: TradeLight,

        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(settings: &Settings) -> Result<()> {
    let level: tracing::Level = settings
        .app
        .log_level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", settings.app.log_level))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings().context("Failed to load application settings")?;
    init_tracing(&settings)?;

    tracing::info!(environment = %settings.app.environment, "Starting application");

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| PathBuf::from(&settings.data.directory));
    let provider = CandleFileProvider::new(&data_dir);

    match cli.command {
        Commands::Backtest { instrument, granularity, family, params, json } => {
            let series = load_series(&provider, &settings, &instrument, granularity)?;
            let params = strategy_factory::parse_params(&params)?;
            let strategy = strategy_factory::create_strategy(family, &params)?;
            let report = Backtester::default().run_strategy(&series, &strategy)?;
            if json {
                report::print_json(&report)?;
            } else {
                report::print_backtest(&format!("{family} [{params}] on {instrument} {granularity}"), &report);
            }
        }
        Commands::Optimize { instrument, granularity, family, config, json } => {
            let series = load_series(&provider, &settings, &instrument, granularity)?;
            let start = Instant::now();
            let results = optimizer::run_optimization(&settings, &series, &config, family)?;
            tracing::info!(duration = ?start.elapsed(), "Optimization finished.");
            if json {
                report::print_json(&results)?;
            } else {
                results.iter().for_each(report::print_optimization);
            }
        }
        Commands::Composite { instrument, granularity, config, json } => {
            let series = load_series(&provider, &settings, &instrument, granularity)?;
            let start = Instant::now();
            let result = optimizer::run_composite(&settings, &series, &config)?;
            tracing::info!(duration = ?start.elapsed(), "Composite optimization finished.");
            if json {
                report::print_json(&result)?;
            } else {
                report::print_composite(&result);
            }
        }
        Commands::Signal { instrument, granularity, family, params } => {
            let series = load_series(&provider, &settings, &instrument, granularity)?;
            let params = strategy_factory::parse_params(&params)?;
            let strategy = strategy_factory::create_strategy(family, &params)?;
            match current_signal(&series, &strategy)? {
                Some(signal) => println!("{instrument} {granularity} {family}: {signal:?}"),
                None => println!("{instrument} {granularity} {family}: no signal (not enough bars)"),
            }
        }
        Commands::Assess { instrument, state, json } => {
            run_assessment(&settings, &provider, instrument, state, json)?;
        }
    }

    tracing::info!("Application has finished successfully.");
    Ok(())
}

fn load_series(
    provider: &CandleFileProvider,
    settings: &Settings,
    instrument: &str,
    granularity: Granularity,
) -> Result<PriceSeries> {
    let instrument = Instrument::from(instrument);
    tracing::info!(%instrument, %granularity, "Loading historical data...");
    let series = provider
        .candles(&instrument, granularity, settings.data.candle_count)
        .with_context(|| format!("Failed to load {instrument} {granularity} candles"))?;
    tracing::info!(bars = series.len(), "Loaded historical data.");
    Ok(series)
}

fn run_assessment(
    settings: &Settings,
    provider: &CandleFileProvider,
    instrument: Option<String>,
    state: TradeLight,
    json: bool,
) -> Result<()> {
    let instruments = match instrument {
        Some(instrument) => vec![instrument],
        None => settings.control.instruments.clone(),
    };
    if instruments.is_empty() {
        anyhow::bail!("No instrument given and none configured under [control].");
    }

    let rule = strategy_factory::create_control_strategy(&settings.control.strategies)?;
    let assessor = Assessor::new(provider, rule, ControlStep::new(settings.control.min_win_rate))
        .with_candle_count(settings.data.candle_count);

    for name in instruments {
        let outcome = assessor.assess(&Instrument::from(name.as_str()), state)?;
        if json {
            report::print_json(&outcome)?;
        } else {
            report::print_control(&name, &outcome);
        }
    }
    Ok(())
}
