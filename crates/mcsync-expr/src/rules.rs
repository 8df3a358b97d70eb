//! Converting between per-option rule tags and flat conjunctions.

use mcsync_model::{Expression, RuleType};

use crate::placeholder::{Placeholder, PlaceholderKind, encode_slot, encode_variable, find_all};
use crate::terms::{NEUTRAL_TERM, join, split};

/// The term an option at `slot` contributes for `rule`.
pub fn rule_term(slot: usize, rule: &RuleType) -> String {
    match rule {
        RuleType::Correct => encode_slot(slot),
        RuleType::Wrong => format!("!{}", encode_slot(slot)),
        RuleType::NoMatter => NEUTRAL_TERM.to_string(),
        RuleType::Variable(name) => format!("{}=={}", encode_slot(slot), encode_variable(name)),
    }
}

/// Builds a dependent expression with one term per rule, in slot order.
pub fn expression_from_rules<'a, I>(rules: I) -> Expression
where
    I: IntoIterator<Item = &'a RuleType>,
{
    let terms: Vec<String> = rules
        .into_iter()
        .enumerate()
        .map(|(slot, rule)| rule_term(slot, rule))
        .collect();
    Expression::new(join(&terms))
}

/// Expression that is true iff every option matches its own rule.
///
/// Neutral options contribute no term, so the result is not a dependent
/// expression and is never synchronized.
pub fn correct_answer_expression<'a, I>(rules: I) -> Expression
where
    I: IntoIterator<Item = &'a RuleType>,
{
    let terms: Vec<String> = rules
        .into_iter()
        .enumerate()
        .filter(|(_, rule)| !rule.is_neutral())
        .map(|(slot, rule)| rule_term(slot, rule))
        .collect();
    Expression::new(join(&terms))
}

/// Classifies a single term.
pub fn classify_term(term: &str) -> RuleType {
    let trimmed = term.trim();
    if trimmed == NEUTRAL_TERM {
        return RuleType::NoMatter;
    }
    if trimmed.strip_prefix('!').is_some_and(starts_with_slot) {
        return RuleType::Wrong;
    }
    if trimmed.contains("]==[") {
        let variable = find_all(trimmed, PlaceholderKind::Variable)
            .into_iter()
            .last()
            .and_then(|m| match m.placeholder {
                Placeholder::Variable(name) => Some(name),
                Placeholder::Slot(_) => None,
            });
        if let Some(name) = variable {
            return RuleType::Variable(name);
        }
    }
    RuleType::Correct
}

fn starts_with_slot(text: &str) -> bool {
    find_all(text, PlaceholderKind::Slot)
        .first()
        .is_some_and(|m| m.span.start == 0)
}

/// Reads back the rule tag of every term of a flat conjunction.
pub fn rules_from_expression(expression: &Expression) -> Vec<RuleType> {
    split(expression.code())
        .iter()
        .map(|term| classify_term(term))
        .collect()
}
