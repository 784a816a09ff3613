//! Quality suite runner.

use std::time::Instant;

use polars::prelude::{DataFrame, PolarsResult};
use tracing::{debug, info, info_span, warn};

use medallion_ingest::any_to_opt_string;
use medallion_model::{CheckKind, CheckResult, QualityReport};

use crate::checks::{CheckInput, QualityCheck, default_checks};
use crate::error::ValidateError;

/// Offending rows rendered into an assertion result.
pub const SAMPLE_ROWS: usize = 5;
/// Distinct values rendered into a listing result.
pub const LISTING_VALUES: usize = 25;

const NULL_MARKER: &str = "<null>";

/// Run the full check catalog.
///
/// # Errors
///
/// Returns the first evaluation error; checks never fail the run by finding
/// offending rows.
pub fn run_suite(input: &CheckInput<'_>) -> Result<QualityReport, ValidateError> {
    run_checks(input, &default_checks())
}

/// Run the given checks in order.
///
/// # Errors
///
/// Returns the first evaluation error.
pub fn run_checks(
    input: &CheckInput<'_>,
    checks: &[QualityCheck],
) -> Result<QualityReport, ValidateError> {
    let span = info_span!("quality_suite", checks = checks.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = QualityReport::default();
    for check in checks {
        let result = run_check(input, check)?;
        if !result.passed() {
            warn!(
                check = %result.name,
                table = %result.table,
                offending_rows = result.row_count,
                "quality check failed"
            );
        }
        report.add(result);
    }

    info!(
        assertions = report.assertion_count(),
        failures = report.failure_count(),
        duration_ms = start.elapsed().as_millis(),
        "quality suite finished"
    );
    Ok(report)
}

/// Evaluate one check and summarize it.
///
/// # Errors
///
/// Returns an error if the check cannot be evaluated.
pub fn run_check(
    input: &CheckInput<'_>,
    check: &QualityCheck,
) -> Result<CheckResult, ValidateError> {
    let rows = check.evaluate(input)?;
    let kind = check.kind();
    let limit = match kind {
        CheckKind::Assertion => SAMPLE_ROWS,
        CheckKind::Listing => LISTING_VALUES,
    };
    let samples = render_rows(&rows, limit).map_err(|source| ValidateError::Evaluation {
        check: check.name.clone(),
        source,
    })?;
    debug!(check = %check.name, rows = rows.height(), "check evaluated");

    Ok(CheckResult {
        name: check.name.clone(),
        table: check
            .target
            .qualified_name(input.warehouse.registry()),
        kind,
        description: check.description.clone(),
        row_count: rows.height(),
        samples,
    })
}

/// First `limit` rows as text. Single-column frames render the bare value,
/// wider frames render `column=value` pairs.
pub fn render_rows(df: &DataFrame, limit: usize) -> PolarsResult<Vec<String>> {
    let columns = df.get_columns();
    let mut rendered = Vec::with_capacity(limit.min(df.height()));
    for idx in 0..df.height().min(limit) {
        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            let value = any_to_opt_string(column.get(idx)?);
            let value = value.as_deref().unwrap_or(NULL_MARKER).to_string();
            if columns.len() == 1 {
                cells.push(value);
            } else {
                cells.push(format!("{}={value}", column.name()));
            }
        }
        rendered.push(cells.join(", "));
    }
    Ok(rendered)
}
