use serde::{Deserialize, Serialize};

use crate::expression::Expression;
use crate::ids::{RuleName, StageId};
use crate::scores::{Percentage, Points};

/// Extra feedback shown depending on the submitted input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Feedback {
    /// When the feedback applies, one term per answer option.
    pub expression: Expression,
    /// Additional condition on exercise variables; not tied to the options.
    #[serde(default)]
    pub condition: Expression,
    #[serde(default)]
    pub points: Points,
    #[serde(default)]
    pub text: Option<String>,
}

impl Feedback {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: Points) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Where a transition leads once it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "stage", rename_all = "snake_case")]
pub enum TransitionTarget {
    Stage(StageId),
    Repeat,
    #[default]
    End,
}

/// Transition from the owning stage to another stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StageTransition {
    /// Generic condition evaluated without user input; not tied to the options.
    #[serde(default)]
    pub condition: Expression,
    /// Stage specific condition over the submitted input, one term per option.
    pub stage_expression: Expression,
    #[serde(default)]
    pub target: TransitionTarget,
}

impl StageTransition {
    pub fn new(stage_expression: Expression, target: TransitionTarget) -> Self {
        Self {
            condition: Expression::default(),
            stage_expression,
            target,
        }
    }
}

/// A hint shown on request, costing a malus on the stage result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageHint {
    pub text: String,
    #[serde(default)]
    pub malus: Percentage,
    /// Back-reference to the owning stage.
    pub stage: StageId,
}

/// Named feedback rule positioned by an explicit order index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRule {
    pub name: RuleName,
    pub order_index: usize,
    #[serde(default)]
    pub validation: Expression,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub points: Points,
    #[serde(default)]
    pub terminal: bool,
}

impl FeedbackRule {
    pub fn new(name: RuleName, order_index: usize) -> Self {
        Self {
            name,
            order_index,
            validation: Expression::default(),
            feedback_text: None,
            points: Points::default(),
            terminal: false,
        }
    }
}
