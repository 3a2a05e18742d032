mod actors;
mod assets;
mod classifiers;
mod config;
mod engine;
#[cfg(test)]
mod fixtures;
mod formats;
mod interpreters;
mod models;
mod pipeline;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{error, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::actors::ExportContext;
use crate::assets::{AssetCatalog, AssetTable};
use crate::config::ExportConfig;
use crate::engine::ExportEngine;
use crate::formats::{ExportFormat, FORMATS};
use crate::storage::ExportStorage;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: If I was making a much more sophisticated CLI application, I would have used the clap crate
    //      to handle the CLI parsing and execution.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: algo-tax-export [transactions].jsonl [assets].csv [format:optional] [log_level:optional] [config].toml:optional > [output].csv");
        eprintln!("Available formats: {} (default: cointracking)", FORMATS.join(", "));
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let transactions_path = &args[1];
    let assets_path = &args[2];
    let format_name = args.get(3).map(String::as_str).unwrap_or("cointracking");
    let log_level = args.get(4).map_or(LevelFilter::ERROR, |level| parse_log_level(level));

    setup_logging(log_level);

    let config = match args.get(5) {
        Some(path) => ExportConfig::from_path(path)?,
        None => ExportConfig::default()
    };
    let config = Arc::new(config);

    let format = formats::lookup(format_name, &config)?;
    info!("Exporting in [{}] format", format.name());
    let table = AssetTable::from_path(assets_path)?;
    info!("Loaded [{}] assets from [{assets_path}]", table.len());

    let catalog = Arc::new(AssetCatalog::new(Arc::new(table)));
    let context = Arc::new(ExportContext::new(config, catalog, Arc::clone(&format)));
    let storage = Arc::new(ExportStorage::new());
    let engine = ExportEngine::new(context, storage.clone());

    let timer = Instant::now();
    if let Err(error) = engine.run(transactions_path).await {
        error!("Export aborted: {error:#}");
        return Err(error);
    }
    let duration = timer.elapsed();

    info!("Exported transactions in: {duration:?}");

    write_results_to_stdout(format.as_ref(), storage)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Invalid log level '{level}', defaulting to 'error'");
        LevelFilter::ERROR
    })
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Because we are doing stdout redirection, we will need to utilize stderr to display logging
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(format: &dyn ExportFormat, storage: Arc<ExportStorage>) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "{}", format.header())?;

    for account in storage.accounts() {
        if let Some(export) = storage.get(&account) {
            for row in &export.rows {
                writeln!(output, "{row}")?;
            }
        }
    }

    output.flush()?;

    Ok(())
}
