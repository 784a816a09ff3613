//! Read-only quality checks over silver tables and gold projections.

pub mod checks;
pub mod error;
pub mod suite;

pub use checks::{CheckInput, CheckRule, CheckTarget, QualityCheck, default_checks};
pub use error::ValidateError;
pub use suite::{render_rows, run_check, run_checks, run_suite};
