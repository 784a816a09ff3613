use std::time::Duration;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use medallion_model::{
    CheckKind, CheckResult, CommitMode, ErrorSeverity, KeyStrategy, LoadReport, QualityReport,
    StepStatus,
};

use crate::types::{CheckSummary, ReloadSummary};

pub fn print_reload_summary(summary: &ReloadSummary) {
    println!("Source: {}", summary.source_dir.display());
    println!(
        "Commit mode: {}  Keys: {}",
        commit_mode_label(summary.commit_mode),
        key_strategy_label(summary.key_strategy)
    );
    if let Some(path) = &summary.key_registry {
        println!("Key registry: {}", path.display());
    }

    print_load_report(&summary.outcome.bronze);
    match &summary.outcome.silver {
        Some(report) => print_load_report(report),
        None => println!("\nsilver: skipped (bronze load failed)"),
    }
    print_view_table(summary);

    if !summary.exported.is_empty() {
        println!();
        println!("Outputs:");
        for file in &summary.exported {
            println!("- {} ({} rows) {}", file.table, file.rows, file.path.display());
        }
    }

    if let Some(report) = summary.outcome.failed_report()
        && let Some(error) = &report.error
    {
        eprintln!();
        eprintln!(
            "Error [{}] {}: {}",
            severity_label(error.severity),
            error.code,
            error.message
        );
        if report.rolled_back {
            eprintln!("The {} layer was restored to its state before the batch.", report.layer);
        }
    }
}

pub fn print_check_summary(summary: &CheckSummary, show_listings: bool) {
    print_reload_summary(&summary.reload);
    let Some(report) = &summary.report else {
        return;
    };
    print_quality_table(report);
    print_failure_samples(report);
    if show_listings {
        print_listings(report);
    }
    println!();
    println!(
        "{} assertions, {} failed",
        report.assertion_count(),
        report.failure_count()
    );
}

fn print_load_report(report: &LoadReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Duration"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for step in &report.steps {
        let rows = match step.status {
            StepStatus::Loaded => Cell::new(step.rows),
            StepStatus::Failed | StepStatus::Skipped => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&step.table),
            rows,
            duration_cell(step.duration, step.status),
            status_cell(step.status),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.loaded_rows()).add_attribute(Attribute::Bold),
        Cell::new(format_duration(report.total_duration)).add_attribute(Attribute::Bold),
        batch_cell(report),
    ]);
    println!();
    println!("{}:", report.layer);
    println!("{table}");
}

fn print_view_table(summary: &ReloadSummary) {
    if summary.views.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("View"),
        header_cell("Description"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for view in &summary.views {
        table.add_row(vec![
            Cell::new(&view.view)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&view.description),
            Cell::new(view.rows),
        ]);
    }
    println!();
    println!("gold:");
    println!("{table}");
}

fn print_quality_table(report: &QualityReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Table"),
        header_cell("Kind"),
        header_cell("Rows"),
        header_cell("Result"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for result in &report.results {
        table.add_row(vec![
            Cell::new(&result.name),
            Cell::new(&result.table),
            kind_cell(result.kind),
            row_count_cell(result),
            result_cell(result),
        ]);
    }
    println!();
    println!("Quality checks:");
    println!("{table}");
}

fn print_failure_samples(report: &QualityReport) {
    let failures: Vec<&CheckResult> = report
        .results
        .iter()
        .filter(|result| !result.passed())
        .collect();
    if failures.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Description"),
        header_cell("Examples"),
    ]);
    apply_issue_table_style(&mut table);
    for result in failures {
        table.add_row(vec![
            Cell::new(&result.name).fg(Color::Red),
            Cell::new(&result.description),
            example_cell(&result.samples),
        ]);
    }
    println!();
    println!("Failures:");
    println!("{table}");
}

fn print_listings(report: &QualityReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Listing"),
        header_cell("Values"),
        header_cell("Distinct"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for result in report
        .results
        .iter()
        .filter(|result| result.kind == CheckKind::Listing)
    {
        table.add_row(vec![
            Cell::new(&result.name),
            Cell::new(result.samples.join(", ")),
            Cell::new(result.row_count),
        ]);
    }
    println!();
    println!("Listings:");
    println!("{table}");
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn status_cell(status: StepStatus) -> Cell {
    match status {
        StepStatus::Loaded => Cell::new("✓").fg(Color::Green),
        StepStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        StepStatus::Skipped => dim_cell("skipped"),
    }
}

fn batch_cell(report: &LoadReport) -> Cell {
    match (&report.error, report.rolled_back) {
        (None, _) => Cell::new("DONE")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        (Some(_), true) => Cell::new("ROLLED BACK")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        (Some(_), false) => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn duration_cell(duration: Duration, status: StepStatus) -> Cell {
    match status {
        StepStatus::Skipped => dim_cell("-"),
        StepStatus::Loaded | StepStatus::Failed => Cell::new(format_duration(duration)),
    }
}

fn kind_cell(kind: CheckKind) -> Cell {
    match kind {
        CheckKind::Assertion => Cell::new("assert"),
        CheckKind::Listing => dim_cell("list"),
    }
}

fn row_count_cell(result: &CheckResult) -> Cell {
    match result.kind {
        CheckKind::Assertion if result.row_count > 0 => Cell::new(result.row_count)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        CheckKind::Assertion | CheckKind::Listing => dim_cell(result.row_count),
    }
}

fn result_cell(result: &CheckResult) -> Cell {
    match result.kind {
        CheckKind::Listing => dim_cell("-"),
        CheckKind::Assertion if result.passed() => Cell::new("PASS").fg(Color::Green),
        CheckKind::Assertion => Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn example_cell(samples: &[String]) -> Cell {
    if samples.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(samples.join("\n"))
    }
}

fn format_duration(duration: Duration) -> String {
    format!("{} ms", duration.as_millis())
}

fn commit_mode_label(mode: CommitMode) -> &'static str {
    match mode {
        CommitMode::PerTable => "per table",
        CommitMode::Atomic => "atomic",
    }
}

fn key_strategy_label(strategy: KeyStrategy) -> &'static str {
    match strategy {
        KeyStrategy::Positional => "positional",
        KeyStrategy::Stable => "stable",
    }
}

fn severity_label(severity: ErrorSeverity) -> &'static str {
    match severity {
        ErrorSeverity::Warning => "WARN",
        ErrorSeverity::Error => "ERROR",
        ErrorSeverity::Fatal => "FATAL",
    }
}
