//! The multiple-choice stage aggregate.
//!
//! [`McStage`] owns the answer options together with every expression that
//! depends on them (extra feedbacks and stage transitions). All structural
//! option edits go through its command methods, which keep both sides aligned
//! through the [`SynchronizationEngine`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use mcsync_expr::{
    correct_answer_expression, expression_from_rules, rules_from_expression, slot_indices, split,
    term_count,
};
use mcsync_model::{
    AnswerOption, Expression, Feedback, FeedbackRule, NewAnswerOption, OptionId, Percentage,
    Points, RuleType, StageHint, StageId, StageTransition,
};

use crate::engine::{DependentExpression, ExpressionOrigin, SyncReport, SynchronizationEngine};
use crate::error::{Result, SyncError};
use crate::ordered::OrderedList;
use crate::store::{AnswerOptionStore, PlannedEdit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McStage {
    id: StageId,
    #[serde(default)]
    options: AnswerOptionStore,
    #[serde(default)]
    extra_feedbacks: Vec<Feedback>,
    #[serde(default)]
    transitions: Vec<StageTransition>,
    #[serde(default)]
    hints: Vec<StageHint>,
    /// Named rules checked in order; independent of the option slots.
    #[serde(default)]
    feedback_rules: OrderedList<FeedbackRule>,
    #[serde(default)]
    randomize: bool,
    #[serde(default)]
    single_choice: bool,
    #[serde(default)]
    correct_answer_feedback: Option<String>,
    #[serde(default)]
    default_feedback: Option<String>,
    #[serde(default)]
    default_result: Percentage,
}

impl McStage {
    pub fn new(id: StageId) -> Self {
        Self {
            id,
            options: AnswerOptionStore::new(),
            extra_feedbacks: Vec::new(),
            transitions: Vec::new(),
            hints: Vec::new(),
            feedback_rules: OrderedList::new(),
            randomize: false,
            single_choice: false,
            correct_answer_feedback: None,
            default_feedback: None,
            default_result: Percentage::default(),
        }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    // ------------------------------------------------------------------
    // Answer options
    // ------------------------------------------------------------------

    pub fn options(&self) -> &AnswerOptionStore {
        &self.options
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Appends an option with the given text and the default rule.
    pub fn add_answer_option(&mut self, text: impl Into<String>) -> Result<OptionId> {
        self.append_option(NewAnswerOption::new(text))
    }

    /// Appends an option; every dependent expression gains a neutral term.
    pub fn append_option(&mut self, data: NewAnswerOption) -> Result<OptionId> {
        let edit = self
            .options
            .plan_append(data)
            .inspect_err(|error| warn!(%error, "append rejected"))?;
        let id = edit.inserted_id().ok_or(SyncError::MissingElement)?;
        self.synchronize(edit)?;
        Ok(id)
    }

    /// Removes the option `id`; its term is dropped from every dependent
    /// expression and later slots are renumbered.
    pub fn remove_option(&mut self, id: OptionId) -> Result<AnswerOption> {
        let edit = self
            .options
            .plan_remove(id)
            .inspect_err(|error| warn!(%error, option = %id, "remove rejected"))?;
        self.synchronize(edit)?
            .removed
            .ok_or(SyncError::OptionNotFound(id))
    }

    /// Moves the option at slot `from` to slot `to`. A move onto itself is a
    /// no-op once both slots are validated.
    pub fn move_option(&mut self, from: usize, to: usize) -> Result<()> {
        let edit = self
            .options
            .plan_move(from, to)
            .inspect_err(|error| warn!(%error, from, to, "move rejected"))?;
        if edit.permutation().is_identity() {
            return Ok(());
        }
        self.synchronize(edit)?;
        Ok(())
    }

    pub fn set_option_text(&mut self, id: OptionId, text: impl Into<String>) -> Result<()> {
        self.option_mut(id)?.text = text.into();
        Ok(())
    }

    pub fn set_option_rule(&mut self, id: OptionId, rule: RuleType) -> Result<()> {
        self.option_mut(id)?.rule = rule;
        Ok(())
    }

    fn option_mut(&mut self, id: OptionId) -> Result<&mut AnswerOption> {
        self.options
            .find_mut(id)
            .ok_or(SyncError::OptionNotFound(id))
    }

    fn synchronize(&mut self, edit: PlannedEdit) -> Result<SyncReport> {
        let Self {
            options,
            extra_feedbacks,
            transitions,
            ..
        } = self;
        let dependents = dependents(extra_feedbacks, transitions);
        SynchronizationEngine::new()
            .synchronize(options, dependents, edit)
            .inspect_err(|error| warn!(%error, "edit rejected"))
    }

    // ------------------------------------------------------------------
    // Dependent expressions
    // ------------------------------------------------------------------

    pub fn extra_feedbacks(&self) -> &[Feedback] {
        &self.extra_feedbacks
    }

    pub fn transitions(&self) -> &[StageTransition] {
        &self.transitions
    }

    /// Adds an extra feedback. Its expression must pass the same checks as
    /// [`McStage::validate`]. Duplicates are allowed.
    pub fn add_feedback(&mut self, feedback: Feedback) -> Result<()> {
        let origin = ExpressionOrigin::ExtraFeedback(self.extra_feedbacks.len());
        self.check_dependent(origin, &feedback.expression)?;
        self.extra_feedbacks.push(feedback);
        Ok(())
    }

    /// Adds an extra feedback generated from one rule per option.
    pub fn add_feedback_from_rules(&mut self, rules: &[RuleType]) -> Result<()> {
        self.add_feedback(Feedback::new(expression_from_rules(rules)))
    }

    pub fn remove_feedback(&mut self, index: usize) -> Result<Feedback> {
        check_index(index, self.extra_feedbacks.len())?;
        Ok(self.extra_feedbacks.remove(index))
    }

    pub fn set_feedback_points(&mut self, index: usize, points: i32) -> Result<()> {
        let points = Points::new(points)?;
        let len = self.extra_feedbacks.len();
        let feedback = self
            .extra_feedbacks
            .get_mut(index)
            .ok_or(SyncError::IndexOutOfBounds { index, len })?;
        feedback.points = points;
        Ok(())
    }

    pub fn set_feedback_text(&mut self, index: usize, text: Option<String>) -> Result<()> {
        let len = self.extra_feedbacks.len();
        let feedback = self
            .extra_feedbacks
            .get_mut(index)
            .ok_or(SyncError::IndexOutOfBounds { index, len })?;
        feedback.text = text;
        Ok(())
    }

    /// Adds a transition. Its stage expression must pass the same checks as
    /// [`McStage::validate`].
    pub fn add_transition(&mut self, transition: StageTransition) -> Result<()> {
        let origin = ExpressionOrigin::StageTransition(self.transitions.len());
        self.check_dependent(origin, &transition.stage_expression)?;
        self.transitions.push(transition);
        Ok(())
    }

    pub fn remove_transition(&mut self, index: usize) -> Result<StageTransition> {
        check_index(index, self.transitions.len())?;
        Ok(self.transitions.remove(index))
    }

    /// Every dependent expression with its origin, feedbacks first.
    pub fn dependent_expressions(&self) -> Vec<(ExpressionOrigin, &Expression)> {
        let feedbacks = self
            .extra_feedbacks
            .iter()
            .enumerate()
            .map(|(i, f)| (ExpressionOrigin::ExtraFeedback(i), &f.expression));
        let transitions = self
            .transitions
            .iter()
            .enumerate()
            .map(|(i, t)| (ExpressionOrigin::StageTransition(i), &t.stage_expression));
        feedbacks.chain(transitions).collect()
    }

    /// The rule tag of every term, per dependent expression.
    pub fn dependent_rules(&self) -> Vec<(ExpressionOrigin, Vec<RuleType>)> {
        self.dependent_expressions()
            .into_iter()
            .map(|(origin, expression)| (origin, rules_from_expression(expression)))
            .collect()
    }

    /// Expression matching exactly the options' own rules.
    pub fn correct_answer_expression(&self) -> Expression {
        correct_answer_expression(self.options.rules())
    }

    /// Checks that every dependent expression has one non-blank term per
    /// option and that every slot placeholder names its own term's slot.
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.options.duplicate_id() {
            return Err(SyncError::DuplicateOption(id));
        }
        for (origin, expression) in self.dependent_expressions() {
            self.check_dependent(origin, expression)?;
        }
        Ok(())
    }

    fn check_dependent(&self, origin: ExpressionOrigin, expression: &Expression) -> Result<()> {
        let terms = term_count(expression.code());
        if terms != self.options.len() {
            return Err(SyncError::InvariantViolation {
                origin,
                terms,
                options: self.options.len(),
            });
        }
        for (slot, term) in split(expression.code()).iter().enumerate() {
            if term.trim().is_empty() {
                return Err(SyncError::EmptyTerm { origin, slot });
            }
            if let Some(found) = slot_indices(term).into_iter().find(|found| *found != slot) {
                return Err(SyncError::MisnumberedSlot {
                    origin,
                    slot,
                    found,
                });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Hints
    // ------------------------------------------------------------------

    pub fn hints(&self) -> &[StageHint] {
        &self.hints
    }

    pub fn add_hint(&mut self, text: impl Into<String>, malus: i32) -> Result<()> {
        self.hints.push(StageHint {
            text: text.into(),
            malus: Percentage::new(malus)?,
            stage: self.id,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Feedback rules
    // ------------------------------------------------------------------

    pub fn feedback_rules(&self) -> &OrderedList<FeedbackRule> {
        &self.feedback_rules
    }

    /// Appends `rule` after the existing rules; its order index is replaced.
    pub fn add_feedback_rule(&mut self, rule: FeedbackRule) -> Result<usize> {
        self.feedback_rules.push(rule)
    }

    pub fn remove_feedback_rule(&mut self, order_index: usize) -> Result<FeedbackRule> {
        self.feedback_rules
            .remove(order_index)
            .inspect_err(|error| warn!(%error, order_index, "rule removal rejected"))
    }

    pub fn move_feedback_rule(&mut self, from: usize, to: usize) -> Result<()> {
        self.feedback_rules.move_item(from, to)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn randomize(&self) -> bool {
        self.randomize
    }

    pub fn set_randomize(&mut self, randomize: bool) {
        self.randomize = randomize;
    }

    pub fn single_choice(&self) -> bool {
        self.single_choice
    }

    pub fn set_single_choice(&mut self, single_choice: bool) {
        self.single_choice = single_choice;
    }

    pub fn correct_answer_feedback(&self) -> Option<&str> {
        self.correct_answer_feedback.as_deref()
    }

    /// Free-text feedback; not a dependent expression.
    pub fn set_correct_answer_feedback(&mut self, feedback: Option<String>) {
        self.correct_answer_feedback = feedback;
    }

    pub fn default_feedback(&self) -> Option<&str> {
        self.default_feedback.as_deref()
    }

    pub fn set_default_feedback(&mut self, feedback: Option<String>) {
        self.default_feedback = feedback;
    }

    pub fn default_result(&self) -> Percentage {
        self.default_result
    }

    pub fn set_default_result(&mut self, result: i32) -> Result<()> {
        self.default_result = Percentage::new(result)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Copying
    // ------------------------------------------------------------------

    /// Copies the stage under a new identity.
    ///
    /// Children are cloned first; afterwards every back-reference is pointed
    /// at the copy. Transition targets keep referring to the original stages.
    pub fn deep_copy(&self, id: StageId) -> McStage {
        let mut copy = McStage {
            id,
            options: self.options.clone(),
            extra_feedbacks: self.extra_feedbacks.clone(),
            transitions: self.transitions.clone(),
            hints: self.hints.clone(),
            feedback_rules: self.feedback_rules.clone(),
            randomize: self.randomize,
            single_choice: self.single_choice,
            correct_answer_feedback: self.correct_answer_feedback.clone(),
            default_feedback: self.default_feedback.clone(),
            default_result: self.default_result,
        };
        for hint in &mut copy.hints {
            hint.stage = id;
        }
        copy
    }
}

fn dependents<'a>(
    feedbacks: &'a mut [Feedback],
    transitions: &'a mut [StageTransition],
) -> Vec<DependentExpression<'a>> {
    let feedbacks = feedbacks.iter_mut().enumerate().map(|(i, f)| {
        DependentExpression::new(ExpressionOrigin::ExtraFeedback(i), &mut f.expression)
    });
    let transitions = transitions.iter_mut().enumerate().map(|(i, t)| {
        DependentExpression::new(ExpressionOrigin::StageTransition(i), &mut t.stage_expression)
    });
    feedbacks.chain(transitions).collect()
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(SyncError::IndexOutOfBounds { index, len });
    }
    Ok(())
}
