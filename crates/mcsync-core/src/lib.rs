//! Positional synchronization of answer options and dependent expressions.
//!
//! # Overview
//!
//! A multiple-choice stage owns an ordered list of answer options and a set
//! of expressions with one term per option. Whenever an option is appended,
//! removed or moved, every such expression is rewritten so that its term
//! count matches the option count and every slot placeholder names its own
//! term's slot.
//!
//! # Example
//!
//! ```
//! use mcsync_core::McStage;
//! use mcsync_model::{RuleType, StageId};
//!
//! let mut stage = McStage::new(StageId::new(1));
//! stage.add_answer_option("Paris")?;
//! stage.add_answer_option("Berlin")?;
//! stage.add_feedback_from_rules(&[RuleType::Correct, RuleType::Wrong])?;
//!
//! stage.move_option(0, 1)?;
//! assert_eq!(stage.extra_feedbacks()[0].expression.code(), "![mc=0]&&[mc=1]");
//! # Ok::<(), mcsync_core::SyncError>(())
//! ```

pub mod engine;
pub mod error;
pub mod ordered;
pub mod permutation;
pub mod stage;
pub mod store;

pub use engine::{DependentExpression, ExpressionOrigin, SyncReport, SynchronizationEngine};
pub use error::{Result, SyncError};
pub use ordered::{OrderIndexed, OrderedList};
pub use permutation::{EditKind, EditPermutation};
pub use stage::McStage;
pub use store::{AnswerOptionStore, PlannedEdit};
