//! Reading and writing stage documents.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use mcsync_core::McStage;

/// Parses a stage document without checking its dependent expressions.
pub fn read_stage(path: &Path) -> Result<McStage> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read stage {}", path.display()))?;
    let stage: McStage = serde_json::from_str(&text)
        .with_context(|| format!("parse stage {}", path.display()))?;
    debug!(path = %path.display(), options = stage.option_count(), "loaded stage");
    Ok(stage)
}

/// Parses a stage document and rejects it unless it is consistent.
pub fn load_stage(path: &Path) -> Result<McStage> {
    let stage = read_stage(path)?;
    stage
        .validate()
        .with_context(|| format!("invalid stage {}", path.display()))?;
    Ok(stage)
}

pub fn write_stage(path: &Path, stage: &McStage) -> Result<()> {
    let json = to_json(stage)?;
    fs::write(path, json + "\n").with_context(|| format!("write stage {}", path.display()))?;
    debug!(path = %path.display(), "wrote stage");
    Ok(())
}

pub fn to_json(stage: &McStage) -> Result<String> {
    serde_json::to_string_pretty(stage).context("serialize stage")
}
