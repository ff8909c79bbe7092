//! On-disk wish history dump: a flat JSON array of records.

use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::gacha::GachaRecord;

pub const DEFAULT_HISTORY_FILE: &str = "gacha-history.json";

pub fn save_history(path: &Path, records: &[GachaRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create history file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("Failed to write history file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write history file: {}", path.display()))?;
    Ok(())
}

pub fn load_history(path: &Path) -> Result<Vec<GachaRecord>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;
    let records = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse history file: {}", path.display()))?;
    Ok(records)
}
