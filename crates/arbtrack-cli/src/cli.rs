//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// arbtrack - Daily profit tracking for deposit-based traffic arbitrage
#[derive(Parser)]
#[command(name = "arbtrack")]
#[command(about = "Ad-arbitrage profit calculator and history analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "arbtrack.db", global = true)]
    pub db: PathBuf,

    /// User whose history is read and written
    #[arg(short, long, default_value = "default", global = true)]
    pub user: String,

    /// Config file (defaults to the per-user config, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a day's numbers and get recommendations
    Add {
        /// Geo name (partial, case-insensitive: "phil", "india")
        #[arg(short, long)]
        geo: String,

        /// Number of deposits
        #[arg(short = 'n', long)]
        deposits: u32,

        /// Ad spend in USD
        #[arg(short, long)]
        spend: f64,

        /// Additional expenses in USD
        #[arg(short, long, default_value_t = 0.0)]
        extra: f64,

        /// Day to record (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the stored breakdown for a day
    Today {
        /// Day to show (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Quick calculation without saving
    Calc {
        /// Geo name
        geo: String,

        /// Number of deposits
        deposits: u32,

        /// Ad spend in USD
        spend: f64,

        /// Additional expenses in USD
        extra: Option<f64>,
    },

    /// Deposits needed to cover a day's costs
    BreakEven {
        /// Geo name
        geo: String,

        /// Ad spend in USD
        spend: f64,

        /// Additional expenses in USD
        extra: Option<f64>,
    },

    /// Totals for a recent period
    Report {
        /// Period: 7, 15, 30, month
        #[arg(short, long, default_value = "7")]
        period: String,
    },

    /// Most (and least) profitable days
    Top {
        /// Number of days to list
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Compare the last N days with the N days before
    Compare {
        /// Window length in days (1-3650)
        #[arg(
            short,
            long,
            default_value = "15",
            value_parser = clap::value_parser!(u32).range(1..=3650)
        )]
        days: u32,
    },

    /// Patterns, anomalies, forecast and budget advice
    Analyze {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configuration and formulas
    Info,

    /// Export history to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format: json, csv
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Import history from a date-keyed JSON file
    Import {
        /// JSON file to import
        #[arg(short, long)]
        file: PathBuf,
    },
}
