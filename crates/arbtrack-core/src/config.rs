//! Engine configuration
//!
//! Process-wide constants consumed by the calculator and the shell:
//! fixed daily cost, share fractions, display currency rate and the
//! geo -> deposit rate table.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path (`--config`), if given
//! 2. Override in data dir (~/.local/share/arbtrack/config.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/defaults.toml");

/// A supported geo and what one deposit pays there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRate {
    pub name: String,
    pub rate: f64,
}

/// Immutable engine configuration, fixed at startup
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fixed cost added to every day's expenses
    pub fixed_expenses: f64,
    /// Operator's fraction of gross profit
    pub my_share_fraction: f64,
    /// Platform fee as a fraction of the operator's share
    pub platform_fee_fraction: f64,
    /// USD -> KZT rate for display only
    pub usd_to_kzt: f64,
    /// Supported geos in display order
    pub geos: Vec<GeoRate>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_expenses: 4.0,
            my_share_fraction: 0.5,
            platform_fee_fraction: 0.0,
            usd_to_kzt: 515.0,
            geos: vec![
                GeoRate {
                    name: "Philippines".to_string(),
                    rate: 20.0,
                },
                GeoRate {
                    name: "India".to_string(),
                    rate: 40.0,
                },
                GeoRate {
                    name: "Algeria".to_string(),
                    rate: 45.0,
                },
                GeoRate {
                    name: "Morocco".to_string(),
                    rate: 50.0,
                },
            ],
        }
    }
}

impl EngineConfig {
    /// Load configuration (explicit path, then data dir override, then defaults)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let content = match explicit {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    debug!(path = %path.display(), "Using config override");
                    fs::read_to_string(&path).map_err(|e| {
                        Error::Config(format!("Failed to read {}: {}", path.display(), e))
                    })?
                }
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::from_toml(&content)
    }

    /// Parse config from TOML content, layered over the built-in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(economics) = raw.economics {
            if let Some(fixed) = economics.fixed_expenses {
                config.fixed_expenses = fixed;
            }
            if let Some(share) = economics.my_share_fraction {
                config.my_share_fraction = share;
            }
            if let Some(fee) = economics.platform_fee_fraction {
                config.platform_fee_fraction = fee;
            }
        }

        if let Some(rate) = raw.display.and_then(|d| d.usd_to_kzt) {
            config.usd_to_kzt = rate;
        }

        if let Some(geos) = raw.geos {
            config.geos = geos;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the calculator relies on
    pub fn validate(&self) -> Result<()> {
        if !self.fixed_expenses.is_finite() || self.fixed_expenses < 0.0 {
            return Err(Error::Config(format!(
                "fixed_expenses must be non-negative, got {}",
                self.fixed_expenses
            )));
        }
        for (name, value) in [
            ("my_share_fraction", self.my_share_fraction),
            ("platform_fee_fraction", self.platform_fee_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        if !self.usd_to_kzt.is_finite() || self.usd_to_kzt <= 0.0 {
            return Err(Error::Config(format!(
                "usd_to_kzt must be positive, got {}",
                self.usd_to_kzt
            )));
        }
        for geo in &self.geos {
            if !geo.rate.is_finite() || geo.rate <= 0.0 {
                return Err(Error::Config(format!(
                    "Deposit rate for {} must be positive, got {}",
                    geo.name, geo.rate
                )));
            }
        }
        Ok(())
    }

    /// Find a geo by case-insensitive substring of its name
    ///
    /// "phil" matches "Philippines". First match in table order wins.
    pub fn find_geo(&self, query: &str) -> Option<&GeoRate> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.geos
            .iter()
            .find(|g| g.name.to_lowercase().contains(&query))
    }

    /// Comma-separated geo names, for error messages
    pub fn geo_names(&self) -> String {
        self.geos
            .iter()
            .map(|g| g.name.to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("arbtrack").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    economics: Option<RawEconomics>,
    display: Option<RawDisplay>,
    geos: Option<Vec<GeoRate>>,
}

#[derive(Debug, Deserialize)]
struct RawEconomics {
    fixed_expenses: Option<f64>,
    my_share_fraction: Option<f64>,
    platform_fee_fraction: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    usd_to_kzt: Option<f64>,
}
