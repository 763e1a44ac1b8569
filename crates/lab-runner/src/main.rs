mod config;
mod wiring;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use core_sim::{History, SimConfig};
use runtime::logging::TracingRunLogWriter;
use runtime::replay::HistoryCsvWriter;
use runtime::Backtest;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = config::Config::from_env()?;
    tracing::info!(
        strategy = config.strategy.as_str(),
        price_source = config.price_source.as_str(),
        initial_cash = config.initial_cash,
        "starting backtest"
    );

    let table = wiring::price_table(&config)?;
    let sim_config = SimConfig::with_initial_cash(config.initial_cash);
    let mut backtest = Backtest::from_table(&table, &sim_config)?;
    let mut strategy = wiring::build_strategy(config.strategy)?;
    let history = backtest.run(strategy.as_mut())?;

    write_history_output(&config.history_output_path, &history)
        .with_context(|| format!("writing history to {}", config.history_output_path))?;

    let summary = backtest.summary();
    tracing::info!(
        final_value = summary.final_value,
        summary = %summary.to_json()?,
        "backtest finished"
    );
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn write_history_output(path: &str, history: &History) -> Result<(), std::io::Error> {
    let history_path = Path::new(path);

    if let Some(parent) = history_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)?;
    }

    let history_file = BufWriter::new(File::create(history_path)?);
    let mut csv_writer = HistoryCsvWriter::new(history_file);
    csv_writer.write_history_and_log(history, &mut TracingRunLogWriter)
}
