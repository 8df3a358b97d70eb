use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mcsync_core::{ExpressionOrigin, McStage};
use mcsync_model::RuleType;

use crate::commands::{ApplyResult, CheckResult, expression_texts};

pub fn print_apply_summary(result: &ApplyResult) {
    println!("Stage: {}", result.stage.id());
    println!("Written: {}", result.written.display());
    let edits: Vec<String> = result.edits.iter().map(ToString::to_string).collect();
    println!("Edits: {}", edits.join(", "));
    println!("{}", options_table(&result.stage));
    println!("{}", expressions_table(result));
}

pub fn print_check(result: &CheckResult) {
    match &result.violation {
        None => println!(
            "OK: {} option(s), {} dependent expression(s)",
            result.options, result.dependents
        ),
        Some(violation) => println!("INVALID: {violation}"),
    }
}

pub fn print_rules(rules: &[(ExpressionOrigin, Vec<RuleType>)]) {
    println!("{}", rules_table(rules));
}

pub fn options_table(stage: &McStage) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Slot"),
        header_cell("Id"),
        header_cell("Text"),
        header_cell("Rule"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (slot, option) in stage.options().iter().enumerate() {
        table.add_row(vec![
            Cell::new(slot),
            Cell::new(option.id),
            Cell::new(&option.text),
            rule_cell(&option.rule),
        ]);
    }
    table
}

pub fn expressions_table(result: &ApplyResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Expression"),
        header_cell("Before"),
        header_cell("After"),
    ]);
    apply_table_style(&mut table);
    for ((origin, before), (_, after)) in result.before.iter().zip(expression_texts(&result.stage))
    {
        let after_cell = if *before == after {
            Cell::new(after).add_attribute(Attribute::Dim)
        } else {
            Cell::new(after).fg(Color::Green)
        };
        table.add_row(vec![Cell::new(origin), Cell::new(display_code(before)), after_cell]);
    }
    table
}

pub fn rules_table(rules: &[(ExpressionOrigin, Vec<RuleType>)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Expression"), header_cell("Rules")]);
    apply_table_style(&mut table);
    for (origin, terms) in rules {
        table.add_row(vec![Cell::new(origin), Cell::new(format_rules(terms))]);
    }
    table
}

/// One rule tag per slot, in slot order.
pub fn format_rules(rules: &[RuleType]) -> String {
    if rules.is_empty() {
        return "-".to_string();
    }
    rules
        .iter()
        .enumerate()
        .map(|(slot, rule)| format!("{slot}:{rule}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn rule_cell(rule: &RuleType) -> Cell {
    let cell = Cell::new(rule);
    match rule {
        RuleType::Correct => cell.fg(Color::Green),
        RuleType::Wrong => cell.fg(Color::Red),
        RuleType::NoMatter => cell.add_attribute(Attribute::Dim),
        RuleType::Variable(_) => cell.fg(Color::Yellow),
    }
}

fn display_code(code: &str) -> &str {
    if code.is_empty() { "(empty)" } else { code }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
