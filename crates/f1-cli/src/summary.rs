use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use f1_cli::pipeline::RunOutcome;
use f1_model::{IntegrityViolation, TableReport};

pub fn print_summary(outcome: &RunOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Input"),
        header_cell("Output"),
        header_cell("Dropped"),
        header_cell("Sentinel"),
        header_cell("Drop reasons"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_input = 0usize;
    let mut total_dropped = 0usize;
    let mut total_sentinel = 0usize;
    for report in &outcome.report.tables {
        total_input += report.input_rows;
        total_dropped += report.total_dropped();
        total_sentinel += report.sentinel_keys;
        table.add_row(vec![
            Cell::new(report.table.as_str()),
            Cell::new(report.input_rows),
            Cell::new(report.output_rows),
            count_cell(report.total_dropped(), Color::Yellow),
            count_cell(report.sentinel_keys, Color::Magenta),
            reasons_cell(report),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_input).add_attribute(Attribute::Bold),
        Cell::new(outcome.report.total_output_rows()).add_attribute(Attribute::Bold),
        count_cell(total_dropped, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total_sentinel, Color::Magenta).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_violations(&outcome.integrity.violations);
    print_loads(outcome);
}

fn print_violations(violations: &[IntegrityViolation]) {
    if violations.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Violation")]);
    apply_table_style(&mut table);
    for violation in violations {
        table.add_row(vec![
            Cell::new(violation_kind(violation)).fg(Color::Red),
            Cell::new(violation.to_string()),
        ]);
    }
    println!();
    println!("Integrity violations:");
    println!("{table}");
}

fn print_loads(outcome: &RunOutcome) {
    if outcome.load_blocked {
        eprintln!("Nothing was loaded: the warehouse failed integrity verification.");
        return;
    }
    if outcome.dry_run {
        println!("Dry run: nothing was loaded.");
        return;
    }
    for load in &outcome.loads {
        println!(
            "Loaded {} rows in {} tables into {} ({})",
            load.rows,
            load.tables,
            load.target.display(),
            load.sink
        );
    }
}

fn violation_kind(violation: &IntegrityViolation) -> &'static str {
    match violation {
        IntegrityViolation::DuplicateKey { .. } => "duplicate key",
        IntegrityViolation::NonContiguousKeys { .. } => "key gap",
        IntegrityViolation::MissingKey { .. } => "missing key",
        IntegrityViolation::OrphanForeignKey { .. } => "orphan",
    }
}

fn reasons_cell(report: &TableReport) -> Cell {
    if report.dropped.is_empty() {
        return dim_cell("-");
    }
    let reasons = report
        .dropped
        .iter()
        .map(|(reason, count)| format!("{reason}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    Cell::new(reasons)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
