//! Shared command utilities
//!
//! This module contains:
//! - `open_db` - Open (and migrate) the record database
//! - `load_config` - Resolve the engine configuration
//! - `parse_date` / `today` - Date argument handling
//! - `resolve_geo` - Match a geo argument against the configured geos

use std::path::Path;

use anyhow::{Context, Result};
use arbtrack_core::config::{EngineConfig, GeoRate};
use arbtrack_core::db::Database;
use chrono::{NaiveDate, Utc};

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn load_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load(explicit).context("Failed to load configuration")
}

/// Current calendar day (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to `today`
pub fn parse_date(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s)),
        None => Ok(today),
    }
}

pub fn resolve_geo<'a>(config: &'a EngineConfig, query: &str) -> Result<&'a GeoRate> {
    config.find_geo(query).with_context(|| {
        format!(
            "Unknown geo: {}. Available: {}",
            query,
            config.geo_names()
        )
    })
}
