//! Compact `YYYYMMDD` integer dates.
//!
//! Sales extracts carry dates as 8-digit integers. Anything that is not a
//! positive 8-digit value naming a real calendar day is treated as absent.

use chrono::NaiveDate;

/// Parse an 8-digit `YYYYMMDD` integer. Zero, negatives, other lengths and
/// impossible dates yield `None`.
pub fn parse_compact_date(value: Option<i64>) -> Option<NaiveDate> {
    let value = value.filter(|v| *v > 0)?;
    let digits = value.to_string();
    if digits.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(&digits, "%Y%m%d").ok()
}
