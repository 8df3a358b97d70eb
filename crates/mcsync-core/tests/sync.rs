use mcsync_core::{ExpressionOrigin, McStage, SyncError};
use mcsync_model::{
    Expression, Feedback, FeedbackRule, NewAnswerOption, OptionId, RuleName, RuleType, StageId,
    StageTransition, TransitionTarget, VariableName,
};
use proptest::prelude::*;

fn stage_with_options(count: usize) -> McStage {
    let mut stage = McStage::new(StageId::new(1));
    for i in 0..count {
        stage.add_answer_option(format!("Answer {}", i + 1)).unwrap();
    }
    stage
}

fn with_feedbacks(count: usize, codes: &[&str]) -> McStage {
    let mut stage = stage_with_options(count);
    for code in codes {
        stage.add_feedback(Feedback::new(Expression::new(*code))).unwrap();
    }
    stage
}

fn feedback_codes(stage: &McStage) -> Vec<&str> {
    stage
        .extra_feedbacks()
        .iter()
        .map(|f| f.expression.code())
        .collect()
}

fn codes(stage: &McStage) -> Vec<String> {
    stage
        .dependent_expressions()
        .into_iter()
        .map(|(_, expression)| expression.code().to_string())
        .collect()
}

fn listing(stage: &McStage) -> String {
    stage
        .dependent_expressions()
        .into_iter()
        .map(|(origin, expression)| format!("{origin}: {expression}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn scenario_a() -> McStage {
    with_feedbacks(
        4,
        &[
            "True&&True&&[mc=2]&&[mc=3]",
            "[mc=0]&&![mc=1]&&![mc=2]&&![mc=3]",
            "![mc=0]&&[mc=1]==[var=v2]&&![mc=2]&&[mc=3]==[var=v1]",
        ],
    )
}

#[test]
fn adjacent_swap_rewrites_every_feedback() {
    let mut stage = scenario_a();
    stage.move_option(1, 2).unwrap();

    assert_eq!(
        feedback_codes(&stage),
        vec![
            "True&&[mc=1]&&True&&[mc=3]",
            "[mc=0]&&![mc=1]&&![mc=2]&&![mc=3]",
            "![mc=0]&&![mc=1]&&[mc=2]==[var=v2]&&[mc=3]==[var=v1]",
        ]
    );
    let texts: Vec<&str> = stage.options().iter().map(|o| o.text.as_str()).collect();
    assert_eq!(texts, vec!["Answer 1", "Answer 3", "Answer 2", "Answer 4"]);
    stage.validate().unwrap();
}

#[test]
fn append_adds_neutral_term() {
    let mut stage = McStage::new(StageId::new(1));
    for rule in [RuleType::Wrong, RuleType::Correct, RuleType::Wrong] {
        stage
            .append_option(NewAnswerOption::new("option").with_rule(rule))
            .unwrap();
    }
    stage
        .add_feedback(Feedback::new(Expression::new("![mc=0]&&[mc=1]&&![mc=2]")))
        .unwrap();

    let id = stage.add_answer_option("fourth").unwrap();

    assert_eq!(feedback_codes(&stage), vec!["![mc=0]&&[mc=1]&&![mc=2]&&true()"]);
    assert_eq!(stage.options().position(id), Some(3));
}

#[test]
fn remove_after_reorder_deletes_and_renumbers() {
    let mut stage = scenario_a();
    stage.move_option(1, 2).unwrap();

    let id = stage.options().get(2).unwrap().id;
    let removed = stage.remove_option(id).unwrap();

    assert_eq!(removed.text, "Answer 2");
    assert_eq!(
        feedback_codes(&stage),
        vec![
            "True&&[mc=1]&&[mc=2]",
            "[mc=0]&&![mc=1]&&![mc=2]",
            "![mc=0]&&![mc=1]&&[mc=2]==[var=v1]",
        ]
    );
}

#[test]
fn removing_the_only_option_empties_every_dependent() {
    let mut stage = with_feedbacks(1, &["[mc=0]", "true()"]);
    stage
        .add_transition(StageTransition::new(
            Expression::new("![mc=0]"),
            TransitionTarget::Repeat,
        ))
        .unwrap();

    let id = stage.options().get(0).unwrap().id;
    stage.remove_option(id).unwrap();

    assert!(stage.options().is_empty());
    assert!(
        stage
            .dependent_expressions()
            .iter()
            .all(|(_, expression)| expression.is_empty())
    );

    stage.add_answer_option("again").unwrap();
    assert_eq!(feedback_codes(&stage), vec!["true()", "true()"]);
    assert_eq!(stage.transitions()[0].stage_expression.code(), "true()");
}

#[test]
fn transitions_follow_option_edits() {
    let mut stage = with_feedbacks(3, &["[mc=0]&&![mc=1]&&true()"]);
    stage
        .add_transition(StageTransition::new(
            Expression::new("true()&&[mc=1]&&![mc=2]"),
            TransitionTarget::Stage(StageId::new(4)),
        ))
        .unwrap();

    stage.move_option(2, 0).unwrap();

    insta::assert_snapshot!(listing(&stage), @r"
    extra feedback #0: true()&&[mc=1]&&![mc=2]
    stage transition #0: ![mc=0]&&true()&&[mc=2]
    ");
}

#[test]
fn move_onto_itself_is_a_no_op() {
    let mut stage = scenario_a();
    let before = stage.clone();
    stage.move_option(2, 2).unwrap();
    assert_eq!(stage, before);
}

#[test]
fn out_of_range_move_changes_nothing() {
    let mut stage = scenario_a();
    let before = stage.clone();
    assert_eq!(
        stage.move_option(0, 4),
        Err(SyncError::IndexOutOfBounds { index: 4, len: 4 })
    );
    assert_eq!(stage, before);
}

#[test]
fn unknown_option_is_not_removed() {
    let mut stage = scenario_a();
    assert_eq!(
        stage.remove_option(OptionId::new(99)).unwrap_err(),
        SyncError::OptionNotFound(OptionId::new(99))
    );
    assert_eq!(stage.option_count(), 4);
}

#[test]
fn malformed_dependent_aborts_the_whole_edit() {
    let json = r#"{
        "id": 1,
        "options": {"options": [{"id": 0, "text": "a"}, {"id": 1, "text": "b"}]},
        "extra_feedbacks": [
            {"expression": "[mc=0]&&![mc=1]"},
            {"expression": "[mc=0]"}
        ]
    }"#;
    let mut stage: McStage = serde_json::from_str(json).unwrap();
    let before = stage.clone();

    let err = stage.move_option(0, 1).unwrap_err();

    assert_eq!(
        err,
        SyncError::InvariantViolation {
            origin: ExpressionOrigin::ExtraFeedback(1),
            terms: 1,
            options: 2
        }
    );
    assert_eq!(stage, before);
}

#[test]
fn removal_that_would_drop_a_blank_term_is_refused() {
    let json = r#"{
        "id": 1,
        "options": {"options": [{"id": 0, "text": "a"}, {"id": 1, "text": "b"}]},
        "extra_feedbacks": [{"expression": "&&"}]
    }"#;
    let mut stage: McStage = serde_json::from_str(json).unwrap();
    assert!(matches!(stage.validate(), Err(SyncError::EmptyTerm { .. })));
    let before = stage.clone();

    let err = stage.remove_option(OptionId::new(0)).unwrap_err();

    assert_eq!(
        err,
        SyncError::InvariantViolation {
            origin: ExpressionOrigin::ExtraFeedback(0),
            terms: 0,
            options: 1
        }
    );
    assert_eq!(stage, before);
}

#[test]
fn append_fails_cleanly_when_identities_run_out() {
    let json = format!(
        r#"{{"id": 1, "options": {{"options": [{{"id": {}, "text": "a"}}]}},
            "extra_feedbacks": [{{"expression": "[mc=0]"}}]}}"#,
        u64::MAX
    );
    let mut stage: McStage = serde_json::from_str(&json).unwrap();
    stage.validate().unwrap();
    let before = stage.clone();

    assert_eq!(
        stage.add_answer_option("b"),
        Err(SyncError::IdentitiesExhausted)
    );
    assert_eq!(stage, before);
}

#[test]
fn feedbacks_from_rules_read_back() {
    let mut stage = stage_with_options(4);
    let rules = vec![
        RuleType::Correct,
        RuleType::Wrong,
        RuleType::NoMatter,
        RuleType::Variable(VariableName::new("v1").unwrap()),
    ];
    stage.add_feedback_from_rules(&rules).unwrap();
    assert_eq!(
        feedback_codes(&stage),
        vec!["[mc=0]&&![mc=1]&&true()&&[mc=3]==[var=v1]"]
    );

    stage.move_option(0, 3).unwrap();

    let (_, read_back) = &stage.dependent_rules()[0];
    assert_eq!(
        read_back,
        &vec![
            RuleType::Wrong,
            RuleType::NoMatter,
            RuleType::Variable(VariableName::new("v1").unwrap()),
            RuleType::Correct,
        ]
    );
}

#[test]
fn feedback_points_are_validated() {
    let mut stage = with_feedbacks(1, &["[mc=0]"]);
    stage.set_feedback_points(0, -100).unwrap();
    assert!(matches!(
        stage.set_feedback_points(0, 101),
        Err(SyncError::Model(_))
    ));
    assert_eq!(stage.extra_feedbacks()[0].points.get(), -100);
}

#[test]
fn stage_round_trips_through_json() {
    let mut stage = scenario_a();
    stage.add_hint("Look closer", 20).unwrap();
    stage
        .add_feedback_rule(FeedbackRule::new(RuleName::new("exact").unwrap(), 0))
        .unwrap();
    stage.set_default_result(40).unwrap();
    let json = serde_json::to_string(&stage).unwrap();
    let loaded: McStage = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, stage);
    loaded.validate().unwrap();
}

#[derive(Debug, Clone)]
enum Op {
    Append,
    Remove(usize),
    Move(usize, usize),
}

fn arb_rule() -> impl Strategy<Value = RuleType> {
    prop_oneof![
        Just(RuleType::Correct),
        Just(RuleType::Wrong),
        Just(RuleType::NoMatter),
        "v[0-9]".prop_map(|v| RuleType::Variable(VariableName::new(v).unwrap())),
    ]
}

fn arb_stage() -> impl Strategy<Value = McStage> {
    (1usize..6)
        .prop_flat_map(|n| {
            prop::collection::vec(prop::collection::vec(arb_rule(), n), 0..4)
                .prop_map(move |feedbacks| (n, feedbacks))
        })
        .prop_map(|(n, feedbacks)| {
            let mut stage = stage_with_options(n);
            for rules in &feedbacks {
                stage.add_feedback_from_rules(rules).unwrap();
            }
            stage
        })
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Append),
        (0usize..8).prop_map(Op::Remove),
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Move(a, b)),
    ]
}

fn run(stage: &mut McStage, op: &Op) {
    let len = stage.option_count();
    match *op {
        Op::Append => {
            stage.add_answer_option("new").unwrap();
        }
        Op::Remove(i) if len > 0 => {
            let id = stage.options().get(i % len).unwrap().id;
            stage.remove_option(id).unwrap();
        }
        Op::Move(a, b) if len > 0 => {
            stage.move_option(a % len, b % len).unwrap();
        }
        Op::Remove(_) | Op::Move(..) => {}
    }
}

proptest! {
    #[test]
    fn every_edit_keeps_dependents_aligned(
        mut stage in arb_stage(),
        ops in prop::collection::vec(arb_op(), 0..12),
    ) {
        for op in &ops {
            run(&mut stage, op);
            prop_assert_eq!(stage.validate(), Ok(()));
        }
    }

    #[test]
    fn removing_an_appended_option_restores_expressions(mut stage in arb_stage()) {
        let before = codes(&stage);
        let id = stage.add_answer_option("temporary").unwrap();
        stage.remove_option(id).unwrap();
        prop_assert_eq!(codes(&stage), before);
    }

    #[test]
    fn moving_back_restores_expressions(
        mut stage in arb_stage(),
        a in 0usize..8,
        b in 0usize..8,
    ) {
        let len = stage.option_count();
        let (a, b) = (a % len, b % len);
        let before = stage.clone();
        stage.move_option(a, b).unwrap();
        stage.move_option(b, a).unwrap();
        prop_assert_eq!(stage, before);
    }
}
