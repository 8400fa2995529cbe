mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{OutputFormat, ScanParams};
use marketpulse::config::Config;
use marketpulse::models::ScanRequest;

#[derive(Parser)]
#[command(
    name = "marketpulse",
    version,
    about = "Weekly YouTube investment and technology trends from grounded Gemini search",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan this week's trending YouTube topics
    Scan {
        /// Number of items to request (6, 10, 20 or 30)
        #[arg(short, long, value_parser = parse_limit)]
        limit: Option<u32>,

        /// Also request the bilingual market analysis
        #[arg(short, long, default_value = "false")]
        analysis: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a saved raw completion without calling the API
    Parse {
        /// File holding the raw completion text
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_limit(s: &str) -> std::result::Result<u32, String> {
    let limit: u32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if ScanRequest::ALLOWED_LIMITS.contains(&limit) {
        Ok(limit)
    } else {
        Err(format!(
            "limit must be one of {:?}",
            ScanRequest::ALLOWED_LIMITS
        ))
    }
}

/// Only `scan` reads the config file; `parse` never calls the API
fn load_config(command: &Commands, path: Option<&Path>) -> Result<Config> {
    match command {
        Commands::Scan { .. } => Config::load(path),
        Commands::Parse { .. } => Config::from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.command, cli.config.as_deref())?;
    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());

    // Initialize tracing/logging
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::info!("marketpulse starting");

    match cli.command {
        Commands::Scan {
            limit,
            analysis,
            format,
            output,
        } => {
            tracing::info!(
                limit = ?limit,
                analysis = %analysis,
                format = ?format,
                output = ?output,
                "Starting scan command"
            );
            commands::scan(
                config,
                ScanParams {
                    limit,
                    analysis,
                    format,
                    output,
                },
            )
            .await?;
        }

        Commands::Parse {
            input,
            format,
            output,
        } => {
            tracing::info!(
                input = %input.display(),
                format = ?format,
                output = ?output,
                "Starting parse command"
            );
            commands::parse(&input, format, output).await?;
        }
    }

    tracing::info!("marketpulse completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("marketpulse=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("marketpulse={level},warn"))
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("marketpulse=info,warn"))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
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
    fn test_parse_limit() {
        assert_eq!(parse_limit("20"), Ok(20));
        assert!(parse_limit("7").is_err());
        assert!(parse_limit("ten").is_err());
    }

    #[test]
    fn test_scan_args() {
        let cli = Cli::try_parse_from([
            "marketpulse",
            "scan",
            "-l",
            "30",
            "--analysis",
            "-f",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Scan {
                limit,
                analysis,
                format,
                output,
            } => {
                assert_eq!(limit, Some(30));
                assert!(analysis);
                assert_eq!(format, OutputFormat::Json);
                assert!(output.is_none());
            }
            Commands::Parse { .. } => panic!("expected scan"),
        }
    }

    #[test]
    fn test_parse_ignores_config_file() {
        let missing = Path::new("does/not/exist.toml");

        let args = ["marketpulse", "-c", "does/not/exist.toml", "parse", "raw.txt"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(load_config(&cli.command, Some(missing)).is_ok());

        let cli = Cli::try_parse_from(["marketpulse", "scan"]).unwrap();
        assert!(load_config(&cli.command, Some(missing)).is_err());
    }

    #[test]
    fn test_scan_rejects_unlisted_limit() {
        assert!(Cli::try_parse_from(["marketpulse", "scan", "--limit", "12"]).is_err());
    }
}
