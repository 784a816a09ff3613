use serde::{Deserialize, Serialize};

/// Whether a check is a pass/fail assertion or an advisory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Expected to return zero rows on healthy data.
    Assertion,
    /// Distinct values for visual inspection; never fails.
    Listing,
}

/// Summary of one executed quality check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Stable check name (e.g. `crm_cust_info_natural_key`).
    pub name: String,
    /// Qualified table or view the check reads.
    pub table: String,
    pub kind: CheckKind,
    pub description: String,
    /// Offending rows for assertions, distinct values for listings.
    pub row_count: usize,
    /// A few offending rows or listed values, rendered as text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<String>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        match self.kind {
            CheckKind::Assertion => self.row_count == 0,
            CheckKind::Listing => true,
        }
    }
}

/// Results of a full quality suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub results: Vec<CheckResult>,
}

impl QualityReport {
    pub fn add(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn assertion_count(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.kind == CheckKind::Assertion)
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|result| !result.passed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|result| result.name == name)
    }
}
