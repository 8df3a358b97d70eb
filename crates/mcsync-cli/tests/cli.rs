//! File round-trips through the command functions.

use std::fs;
use std::path::{Path, PathBuf};

use mcsync_cli::commands::{ApplyOptions, run_apply, run_check, run_rules};
use mcsync_cli::document::{read_stage, write_stage};
use mcsync_cli::edit::EditRequest;
use mcsync_cli::summary::format_rules;
use mcsync_core::{ExpressionOrigin, McStage, SyncError};
use mcsync_model::{Expression, Feedback, RuleType, StageId, StageTransition, TransitionTarget};
use tempfile::TempDir;

const STAGE: &str = r#"{
  "id": 7,
  "options": {
    "options": [
      {"id": 0, "text": "Paris", "rule": {"kind": "CORRECT"}},
      {"id": 1, "text": "Lyon"},
      {"id": 2, "text": "Nice", "rule": {"kind": "NO_MATTER"}}
    ],
    "next_id": 3
  },
  "extra_feedbacks": [
    {"expression": "[mc=0]&&![mc=1]&&true()", "points": 10, "text": "Well done"}
  ],
  "transitions": [
    {"stage_expression": "![mc=0]&&true()&&true()", "target": {"kind": "repeat"}}
  ]
}"#;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn edits(args: &[&str]) -> Vec<EditRequest> {
    args.iter().map(|arg| arg.parse().unwrap()).collect()
}

fn codes(path: &Path) -> Vec<String> {
    read_stage(path)
        .unwrap()
        .dependent_expressions()
        .into_iter()
        .map(|(_, expression)| expression.code().to_string())
        .collect()
}

#[test]
fn apply_writes_synchronized_document() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "stage.json", STAGE);
    let output = dir.path().join("out.json");

    let result = run_apply(&ApplyOptions {
        stage: input.clone(),
        edits: edits(&["move:2:0", "append:Lille", "remove:1"]),
        output: Some(output.clone()),
    })
    .unwrap();

    assert_eq!(result.written, output);
    assert_eq!(
        codes(&output),
        vec!["true()&&[mc=1]&&true()", "true()&&![mc=1]&&true()"]
    );
    let texts: Vec<String> = read_stage(&output)
        .unwrap()
        .options()
        .iter()
        .map(|o| o.text.clone())
        .collect();
    assert_eq!(texts, vec!["Nice", "Paris", "Lille"]);
    assert_eq!(fs::read_to_string(&input).unwrap(), STAGE);
}

#[test]
fn apply_without_output_overwrites_input() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "stage.json", STAGE);

    run_apply(&ApplyOptions {
        stage: input.clone(),
        edits: edits(&["move:0:1"]),
        output: None,
    })
    .unwrap();

    assert_eq!(
        codes(&input),
        vec!["![mc=0]&&[mc=1]&&true()", "true()&&![mc=1]&&true()"]
    );
}

#[test]
fn failing_edit_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "stage.json", STAGE);
    let output = dir.path().join("out.json");

    let error = run_apply(&ApplyOptions {
        stage: input.clone(),
        edits: edits(&["append:Lille", "remove:42"]),
        output: Some(output.clone()),
    })
    .unwrap_err();

    assert!(format!("{error:#}").contains("edit #2 (remove:42) failed"));
    assert!(!output.exists());
    assert_eq!(fs::read_to_string(&input).unwrap(), STAGE);
}

#[test]
fn inconsistent_document_is_rejected_before_editing() {
    let dir = TempDir::new().unwrap();
    let broken = STAGE.replace("[mc=0]&&![mc=1]&&true()", "[mc=0]&&![mc=1]");
    let input = write_fixture(&dir, "broken.json", &broken);

    let check = run_check(&input).unwrap();
    assert!(!check.is_valid());
    assert_eq!(
        check.violation,
        Some(SyncError::InvariantViolation {
            origin: ExpressionOrigin::ExtraFeedback(0),
            terms: 2,
            options: 3
        })
    );

    let error = run_apply(&ApplyOptions {
        stage: input.clone(),
        edits: edits(&["append:x"]),
        output: None,
    })
    .unwrap_err();
    assert!(format!("{error:#}").contains("invalid stage"));
}

#[test]
fn check_accepts_consistent_document() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "stage.json", STAGE);
    let check = run_check(&input).unwrap();
    assert!(check.is_valid());
    assert_eq!(check.options, 3);
    assert_eq!(check.dependents, 2);
}

#[test]
fn rules_reads_every_dependent() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "stage.json", STAGE);

    let rules = run_rules(&input).unwrap();

    assert_eq!(rules[0].0, ExpressionOrigin::ExtraFeedback(0));
    assert_eq!(
        rules[1].1,
        vec![RuleType::Wrong, RuleType::NoMatter, RuleType::NoMatter]
    );
    insta::assert_snapshot!(format_rules(&rules[0].1), @"0:CORRECT 1:WRONG 2:NO_MATTER");
}

#[test]
fn written_documents_load_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.json");
    let mut stage = McStage::new(StageId::new(3));
    stage.add_answer_option("yes").unwrap();
    stage.add_answer_option("no").unwrap();
    stage
        .add_feedback(Feedback::new(Expression::new("[mc=0]&&![mc=1]")))
        .unwrap();
    stage
        .add_transition(StageTransition::new(
            Expression::new("true()&&[mc=1]"),
            TransitionTarget::Stage(StageId::new(4)),
        ))
        .unwrap();

    write_stage(&path, &stage).unwrap();

    assert_eq!(read_stage(&path).unwrap(), stage);
}

#[test]
fn missing_document_reports_path() {
    let dir = TempDir::new().unwrap();
    let error = run_check(&dir.path().join("nope.json")).unwrap_err();
    assert!(format!("{error:#}").contains("nope.json"));
}
