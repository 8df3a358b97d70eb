pub mod error;
pub mod expression;
pub mod feedback;
pub mod ids;
pub mod option;
pub mod rule;
pub mod scores;

pub use error::{ModelError, Result};
pub use expression::Expression;
pub use feedback::{Feedback, FeedbackRule, StageHint, StageTransition, TransitionTarget};
pub use ids::{OptionId, RuleName, StageId, VariableName};
pub use option::{AnswerOption, NewAnswerOption};
pub use rule::RuleType;
pub use scores::{Percentage, Points};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_option_defaults_to_wrong() {
        let option = NewAnswerOption::new("Answer 1").into_option(OptionId::new(7));
        assert_eq!(option.id, OptionId::new(7));
        assert_eq!(option.rule, RuleType::Wrong);
        assert_eq!(option.text, "Answer 1");
    }

    #[test]
    fn feedback_serializes() {
        let feedback = Feedback::new(Expression::new("[mc=0]&&true()"))
            .with_points(Points::new(-20).expect("valid points"))
            .with_text("Almost");
        let json = serde_json::to_string(&feedback).expect("serialize feedback");
        let round: Feedback = serde_json::from_str(&json).expect("deserialize feedback");
        assert_eq!(round, feedback);
        assert_eq!(round.expression.code(), "[mc=0]&&true()");
    }
}
