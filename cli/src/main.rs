//! commission-calc - command-line front end for the commission engine
//!
//! Reads a deal (JSON) and a catalog (JSON), runs the calculation and
//! writes the result as JSON, a text summary, or bare SQL.
//!
//! Logs go to stderr; stdout carries only the result.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use commission_engine_core_rs::catalog::{validate_catalog, InMemoryCatalog};
use commission_engine_core_rs::input::validate_deal;
use commission_engine_core_rs::report::render_text;
use commission_engine_core_rs::{
    CalculationResult, Clock, CommissionEngine, DealInput, EngineConfig, FixedClock, SystemClock,
};
use tracing::info;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Sql,
}

#[derive(Parser, Debug)]
#[command(name = "commission-calc", version, about = "Calculate deal commissions and ledger statements")]
struct Cli {
    /// Deal input JSON file ("-" for stdin)
    #[arg(short = 'd', long = "deal", default_value = "-")]
    deal: String,

    /// Catalog JSON file with schemas and policies
    #[arg(short = 'c', long = "catalog")]
    catalog: PathBuf,

    /// Engine config JSON file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    format: OutputFormat,

    /// Freeze the clock at this RFC 3339 instant
    #[arg(long = "as-of")]
    as_of: Option<String>,

    /// Output file (default stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Validate the catalog and exit
    #[arg(long = "check-catalog")]
    check_catalog: bool,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = InMemoryCatalog::from_path(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;

    if cli.check_catalog {
        return check_catalog(&catalog);
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };

    let deal = read_deal(&cli.deal)?;
    validate_deal(&deal).context("invalid deal input")?;

    let clock: Box<dyn Clock> = match &cli.as_of {
        Some(text) => {
            let instant = DateTime::parse_from_rfc3339(text)
                .with_context(|| format!("parsing --as-of '{}'", text))?;
            Box::new(FixedClock::new(instant.with_timezone(&Utc)))
        }
        None => Box::new(SystemClock),
    };

    let engine = CommissionEngine::from_catalog(catalog, config)?;
    let result = engine.calculate_at(&deal, clock.as_ref())?;

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    write_result(&mut writer, &result, cli.format)?;
    writer.flush()?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_deal(source: &str) -> Result<DealInput> {
    let reader: Box<dyn Read> = if source == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(source).with_context(|| format!("opening deal {}", source))?)
    };
    serde_json::from_reader(BufReader::new(reader)).context("decoding deal input")
}

fn check_catalog(catalog: &InMemoryCatalog) -> Result<()> {
    let fingerprint = catalog.compute_fingerprint()?;
    match validate_catalog(catalog) {
        Ok(()) => {
            info!(%fingerprint, "catalog is valid");
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                eprintln!("{}", issue);
            }
            bail!("catalog has {} issue(s)", issues.len())
        }
    }
}

fn write_result(w: &mut dyn Write, result: &CalculationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, result)?;
            writeln!(w)?;
        }
        OutputFormat::Text => write!(w, "{}", render_text(result))?,
        OutputFormat::Sql => {
            for sql in &result.sql_queries {
                writeln!(w, "{}\n", sql)?;
            }
            for error in &result.validation_errors {
                writeln!(w, "-- {}", error)?;
            }
        }
    }
    Ok(())
}
