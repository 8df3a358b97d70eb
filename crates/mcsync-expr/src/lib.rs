//! Text-level building blocks for stage expressions.
//!
//! - [`placeholder`]: encoding, finding and renaming placeholder tokens
//! - [`terms`]: splitting a flat conjunction into per-slot terms and joining them
//! - [`rules`]: generating and reading expressions from per-option rule tags

pub mod error;
pub mod placeholder;
pub mod rules;
pub mod terms;

pub use error::{ExprError, Result};
pub use placeholder::{
    Placeholder, PlaceholderKind, TokenMatch, encode_slot, encode_variable, find_all,
    rename_slot, rename_slots, slot_indices,
};
pub use rules::{
    classify_term, correct_answer_expression, expression_from_rules, rule_term,
    rules_from_expression,
};
pub use terms::{CONJUNCTION, NEUTRAL_TERM, join, split, term_count};
