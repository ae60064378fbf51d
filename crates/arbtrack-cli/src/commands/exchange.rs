//! Import/export command implementations

use std::path::Path;

use anyhow::{Context, Result};
use arbtrack_core::db::Database;
use arbtrack_core::export::{self, ExportFormat};

pub fn cmd_export(db: &Database, user: &str, output: &Path, format: &str) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let history = db
        .list_daily_records(user)
        .context("Failed to load history")?;

    let contents = export::export_history(&history, format)?;
    export::write_atomic(output, &contents)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "✅ Exported {} days as {} to {}",
        history.len(),
        format,
        output.display()
    );
    Ok(())
}

pub fn cmd_import(db: &Database, user: &str, file: &Path) -> Result<()> {
    println!("📥 Importing history from {}...", file.display());

    let summary = export::import_history_file(db, user, file)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!("✅ Imported {} days", summary.imported);
    if summary.skipped > 0 {
        println!(
            "   ⚠️  Skipped {} unreadable entries (see the warnings above)",
            summary.skipped
        );
    }
    Ok(())
}
