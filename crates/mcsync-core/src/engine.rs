//! Applies one edit permutation to the option list and every dependent
//! expression as a single all-or-nothing step.
//!
//! # Algorithm
//!
//! Each dependent expression is split into its terms, and every term is tagged
//! with its old slot. The tagged terms are permuted exactly like the options
//! (an append adds an untagged neutral term). A term whose slot changed then
//! has its slot placeholders renamed from the old slot to the new one.
//!
//! All rewrites are computed before anything is stored, so a failing
//! expression leaves the stage untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

use mcsync_expr::{NEUTRAL_TERM, join, rename_slot, split, term_count};
use mcsync_model::{AnswerOption, Expression, OptionId};

use crate::error::{Result, SyncError};
use crate::permutation::{EditKind, EditPermutation};
use crate::store::{AnswerOptionStore, PlannedEdit};

/// Which part of a stage a dependent expression belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum ExpressionOrigin {
    ExtraFeedback(usize),
    StageTransition(usize),
}

impl fmt::Display for ExpressionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionOrigin::ExtraFeedback(index) => write!(f, "extra feedback #{index}"),
            ExpressionOrigin::StageTransition(index) => write!(f, "stage transition #{index}"),
        }
    }
}

/// An expression that must always have one term per answer option.
#[derive(Debug)]
pub struct DependentExpression<'a> {
    pub origin: ExpressionOrigin,
    pub expression: &'a mut Expression,
}

impl<'a> DependentExpression<'a> {
    pub fn new(origin: ExpressionOrigin, expression: &'a mut Expression) -> Self {
        Self { origin, expression }
    }
}

/// Summary of one synchronized edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub edit: EditKind,
    pub options_before: usize,
    pub options_after: usize,
    /// Dependent expressions whose text changed.
    pub rewritten: usize,
    pub inserted: Option<OptionId>,
    pub removed: Option<AnswerOption>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SynchronizationEngine;

impl SynchronizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rewrites one flat conjunction for `permutation`.
    ///
    /// Fails with [`SyncError::InvariantViolation`] if `code` does not have
    /// exactly one term per option before the edit, or if the rewritten text
    /// would not read back as one term per option after it.
    pub fn rewrite(
        &self,
        origin: ExpressionOrigin,
        code: &str,
        permutation: &EditPermutation,
    ) -> Result<String> {
        let terms = split(code);
        if terms.len() != permutation.old_len() {
            return Err(SyncError::InvariantViolation {
                origin,
                terms: terms.len(),
                options: permutation.old_len(),
            });
        }

        let mut tagged: Vec<(Option<usize>, String)> = terms
            .into_iter()
            .enumerate()
            .map(|(slot, term)| (Some(slot), term))
            .collect();
        permutation.apply(&mut tagged, Some((None, NEUTRAL_TERM.to_string())))?;

        let rewritten = tagged
            .into_iter()
            .enumerate()
            .map(|(slot, (old_slot, term))| match old_slot {
                Some(old_slot) if old_slot != slot => rename_slot(&term, old_slot, slot),
                _ => Ok(term),
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Blank terms may not survive the round trip through text.
        let code = join(&rewritten);
        let terms = term_count(&code);
        if terms != permutation.new_len() {
            return Err(SyncError::InvariantViolation {
                origin,
                terms,
                options: permutation.new_len(),
            });
        }
        Ok(code)
    }

    /// Applies `edit` to every dependent expression and then to `store`.
    ///
    /// Either every expression and the store are updated, or nothing is.
    pub fn synchronize(
        &self,
        store: &mut AnswerOptionStore,
        dependents: Vec<DependentExpression<'_>>,
        edit: PlannedEdit,
    ) -> Result<SyncReport> {
        let permutation = *edit.permutation();
        let span = debug_span!("synchronize", edit = %permutation.kind(), options = store.len());
        let _guard = span.enter();

        if store.len() != permutation.old_len() {
            return Err(SyncError::StaleEdit {
                expected: permutation.old_len(),
                actual: store.len(),
            });
        }

        let mut rewrites = Vec::with_capacity(dependents.len());
        for dependent in &dependents {
            let code = self.rewrite(dependent.origin, dependent.expression.code(), &permutation)?;
            rewrites.push(code);
        }

        let inserted = edit.inserted_id();
        let removed = store.apply(edit)?;

        let mut rewritten = 0;
        for (DependentExpression { origin, expression }, code) in dependents.into_iter().zip(rewrites)
        {
            if expression.code() != code {
                debug!(
                    origin = %origin,
                    before = expression.code(),
                    after = code.as_str(),
                    "rewrote dependent expression"
                );
                rewritten += 1;
                expression.set_code(code);
            }
        }

        let report = SyncReport {
            edit: permutation.kind(),
            options_before: permutation.old_len(),
            options_after: store.len(),
            rewritten,
            inserted,
            removed,
        };
        info!(
            edit = %report.edit,
            options = report.options_after,
            rewritten = report.rewritten,
            "synchronized answer options"
        );
        Ok(report)
    }
}
