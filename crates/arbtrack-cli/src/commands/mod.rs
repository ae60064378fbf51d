//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db, load_config, date and geo parsing)
//! - `entry` - Day entry and calculator commands (add, today, calc, break-even)
//! - `exchange` - History import/export
//! - `reports` - Report and analytics commands (report, top, compare, analyze, info)

pub mod core;
pub mod entry;
pub mod exchange;
pub mod reports;

// Re-export command functions for main.rs
pub use core::*;
pub use entry::*;
pub use exchange::*;
pub use reports::*;
