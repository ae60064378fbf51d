//! arbtrack CLI - Ad-arbitrage profit tracker
//!
//! Usage:
//!   arbtrack add --geo phil -n 12 --spend 150   Record today's numbers
//!   arbtrack calc india 8 120                   Quick calculation
//!   arbtrack report --period month             Period totals
//!   arbtrack analyze                            History analytics

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let today = commands::today();

    match cli.command {
        Commands::Add {
            geo,
            deposits,
            spend,
            extra,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            let date = commands::parse_date(date.as_deref(), today)?;
            let entry = commands::DayEntry {
                geo,
                deposits,
                spend,
                extra,
            };
            commands::cmd_add(&db, &config, &cli.user, &entry, date)
        }
        Commands::Today { date } => {
            let db = commands::open_db(&cli.db)?;
            let date = commands::parse_date(date.as_deref(), today)?;
            commands::cmd_today(&db, &config, &cli.user, date)
        }
        Commands::Calc {
            geo,
            deposits,
            spend,
            extra,
        } => {
            let entry = commands::DayEntry {
                geo,
                deposits,
                spend,
                extra: extra.unwrap_or(0.0),
            };
            commands::cmd_calc(&config, &entry)
        }
        Commands::BreakEven { geo, spend, extra } => {
            commands::cmd_break_even(&config, &geo, spend, extra.unwrap_or(0.0))
        }
        Commands::Report { period } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_report(&db, &config, &cli.user, &period, today)
        }
        Commands::Top { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_top(&db, &config, &cli.user, limit)
        }
        Commands::Compare { days } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_compare(&db, &config, &cli.user, days, today)
        }
        Commands::Analyze { json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_analyze(&db, &config, &cli.user, json)
        }
        Commands::Info => commands::cmd_info(&config, &cli.db, &cli.user),
        Commands::Export { output, format } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, &cli.user, &output, &format)
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, &cli.user, &file)
        }
    }
}
