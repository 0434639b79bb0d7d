mod engine;
mod extractor;
mod models;
mod types;

use std::io::stderr;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::ReportEngine;
use crate::types::ReportVariant;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: clearing-report [us|them] [input].xml [output_dir:optional] [log_level:optional]");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let variant = match ReportVariant::from_str(&args[1]) {
        Ok(variant) => variant,
        Err(error) => {
            eprintln!("{error}");
            exit(1);
        }
    };

    let input = Path::new(&args[2]);
    let output_dir = Path::new(args.get(3).map(String::as_str).unwrap_or("."));
    let log_level = args.get(4)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let mut engine = ReportEngine::new();

    if let Ok(namespace) = std::env::var("CLEARING_REPORT_NAMESPACE") {
        engine = engine.with_namespace(namespace);
    }

    if let Ok(max_bytes) = std::env::var("CLEARING_REPORT_MAX_BYTES") {
        match max_bytes.trim().parse::<u64>() {
            Ok(max_bytes) => engine = engine.with_max_document_bytes(max_bytes),
            Err(error) => warn!("Ignoring CLEARING_REPORT_MAX_BYTES '{max_bytes}': {error}")
        }
    }

    debug!("Extracting [{}] with namespace [{}] and limit [{}] bytes", input.display(), engine.namespace(), engine.max_document_bytes());

    let timer = Instant::now();
    let report = engine.generate(input, variant).await?;
    let duration = timer.elapsed();

    info!("Extracted clearing records in: {duration:?}");

    let output_path = report.save(output_dir)?;

    println!("{}", output_path.display());

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout is reserved for the written report path, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
