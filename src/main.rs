//! rnlog command-line front end.
//!
//! ```text
//! rnlog [--config FILE] [--threshold LEVEL] emit <LEVEL> [-i key=value]... <MESSAGE>...
//! rnlog [--config FILE] check
//! ```
//!
//! Records go to the configured sink (stdout by default). Internal
//! diagnostics go to stderr, filtered by `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rnlog::{config, Items, Logger, Severity};

#[derive(Parser)]
#[command(name = "rnlog")]
#[command(about = "Emit leveled JSON log lines", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults plus RNLOG_* variables when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured threshold
    #[arg(short, long)]
    threshold: Option<Severity>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record
    Emit {
        /// Record level
        #[arg(value_enum)]
        level: EmitLevel,

        /// Annotation as key=value; the value is parsed as JSON when possible
        #[arg(short, long = "item", value_parser = parse_item)]
        items: Vec<(String, Value)>,

        /// Message words, joined with single spaces
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Validate the configuration and print the effective settings
    Check,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmitLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Notice,
    Fatal,
}

fn parse_item(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.is_empty() {
        return Err("item key must not be empty".to_string());
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn emit(logger: &Logger, level: EmitLevel, items: &Items, msg: &str) {
    match level {
        EmitLevel::Trace => logger.trace_item(items, msg),
        EmitLevel::Debug => logger.debug_item(items, msg),
        EmitLevel::Info => logger.info_item(items, msg),
        EmitLevel::Warn => logger.warn_item(items, msg),
        EmitLevel::Error => logger.error_item(items, msg),
        EmitLevel::Notice => logger.notice_item(items, msg),
        EmitLevel::Fatal => logger.fatal_item(items, msg),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rnlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rnlog: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = config::load(cli.config.as_deref())?;
    if let Some(threshold) = cli.threshold {
        settings.level = threshold.label().to_ascii_lowercase();
    }

    match cli.command {
        Commands::Check => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Commands::Emit {
            level,
            items,
            message,
        } => {
            let logger = settings.build()?;
            let items: Map<String, Value> = items.into_iter().collect();
            emit(&logger, level, &items, &message.join(" "));
            logger.sink().flush();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("id=42").unwrap(), ("id".to_string(), Value::from(42)));
        assert_eq!(
            parse_item("user=bob").unwrap(),
            ("user".to_string(), Value::String("bob".into()))
        );
        assert_eq!(
            parse_item("expr=a=b").unwrap(),
            ("expr".to_string(), Value::String("a=b".into()))
        );
        assert!(parse_item("novalue").is_err());
        assert!(parse_item("=1").is_err());
    }

    #[test]
    fn test_emit_args() {
        let cli = Cli::try_parse_from([
            "rnlog", "--threshold", "warn", "emit", "error", "-i", "id=1", "disk", "full",
        ])
        .unwrap();
        assert_eq!(cli.threshold, Some(Severity::Warn));
        match cli.command {
            Commands::Emit { items, message, .. } => {
                assert_eq!(items.len(), 1);
                assert_eq!(message, ["disk", "full"]);
            }
            Commands::Check => panic!("expected emit"),
        }
    }
}
