//! Binary entrypoint for the simplog CLI.
//!
//! Commands:
//! - `emit <message> [-l <level>] [-f key=value]... [-o <file>]` - write one log line
//! - `init` - create a starter `simplog.toml`
//!
//! See the library crate docs for module-level details: `simplog::`.
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use simplog::config::LoggerConfig;
use simplog::logger::{FileSink, Log, StdoutSink, DEFAULT_LEVEL};
use simplog::value::{Fields, Value};

const DEFAULT_CONFIG_PATH: &str = "simplog.toml";

#[derive(Parser)]
#[command(name = "simplog")]
#[command(about = "Emit structured key=value log lines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose diagnostics on stderr (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a single log line
    Emit {
        /// Message text, always the last field on the line
        message: String,

        /// Level value
        #[arg(short, long, default_value = DEFAULT_LEVEL)]
        level: String,

        /// Extra field as key=value; repeat for more, order is kept
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Quote every value
        #[arg(long)]
        force_quotes: bool,

        /// Label to prefix the timestamp with
        #[arg(long)]
        time_label: Option<String>,

        /// Append to this file instead of writing to stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some(("", _)) => Err(format!("field {:?} has an empty key", raw)),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected key=value, got {:?}", raw)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Emit {
            message,
            level,
            fields,
            force_quotes,
            time_label,
            output,
        } => {
            let mut config = match &cli.config {
                Some(path) => LoggerConfig::load(path)?,
                None => LoggerConfig::default(),
            };
            if force_quotes {
                config.force_quotes = true;
            }
            if time_label.is_some() {
                config.time_label = time_label;
            }
            debug!("Effective config: {:?}", config);

            let fields: Fields = fields.into_iter().collect();
            let logger = match &output {
                Some(path) => {
                    let sink = FileSink::append(path)
                        .with_context(|| format!("Failed to open log output {}", path))?;
                    config.builder(sink).build()?
                }
                None => config.builder(StdoutSink).build()?,
            };
            logger.log_with(Value::from(message), Value::from(level), fields)?;
        }
        Commands::Init { force } => {
            let path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
            if Path::new(path).exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path);
            }
            LoggerConfig::create_default(path)?;
            info!("Wrote default configuration to {}", path);
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let base_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    builder.target(env_logger::Target::Stderr);
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    builder.init();
}
