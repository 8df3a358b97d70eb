use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use mcsync_core::{ExpressionOrigin, McStage, SyncError};
use mcsync_model::RuleType;

use crate::document::{load_stage, read_stage, write_stage};
use crate::edit::EditRequest;

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub stage: PathBuf,
    pub edits: Vec<EditRequest>,
    /// Destination; the input document is overwritten when `None`.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ApplyResult {
    pub stage: McStage,
    /// Dependent expression texts before the first edit.
    pub before: Vec<(ExpressionOrigin, String)>,
    pub edits: Vec<EditRequest>,
    pub written: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub options: usize,
    pub dependents: usize,
    pub violation: Option<SyncError>,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}

/// Applies every edit in order. Nothing is written unless all edits succeed.
pub fn run_apply(options: &ApplyOptions) -> Result<ApplyResult> {
    let span = info_span!("apply", stage = %options.stage.display());
    let _guard = span.enter();

    let mut stage = load_stage(&options.stage)?;
    let before = expression_texts(&stage);
    for (position, edit) in options.edits.iter().enumerate() {
        edit.apply(&mut stage)
            .with_context(|| format!("edit #{} ({edit}) failed", position + 1))?;
    }

    let written = options
        .output
        .clone()
        .unwrap_or_else(|| options.stage.clone());
    write_stage(&written, &stage)?;
    info!(edits = options.edits.len(), options = stage.option_count(), "stage updated");

    Ok(ApplyResult {
        stage,
        before,
        edits: options.edits.clone(),
        written,
    })
}

pub fn run_check(path: &Path) -> Result<CheckResult> {
    let stage = read_stage(path)?;
    Ok(CheckResult {
        options: stage.option_count(),
        dependents: stage.dependent_expressions().len(),
        violation: stage.validate().err(),
    })
}

pub fn run_rules(path: &Path) -> Result<Vec<(ExpressionOrigin, Vec<RuleType>)>> {
    Ok(load_stage(path)?.dependent_rules())
}

pub fn expression_texts(stage: &McStage) -> Vec<(ExpressionOrigin, String)> {
    stage
        .dependent_expressions()
        .into_iter()
        .map(|(origin, expression)| (origin, expression.code().to_string()))
        .collect()
}
