//! Code-to-label mappings for categorical columns.
//!
//! Codes are compared trimmed and case-insensitively. Anything unmapped
//! becomes `n/a`, except countries, which pass through trimmed.

use medallion_model::columns::NOT_AVAILABLE;

fn code_key(raw: Option<&str>) -> String {
    raw.map(|value| value.trim().to_ascii_uppercase())
        .unwrap_or_default()
}

/// `S → Single`, `M → Married`, else `n/a`.
pub fn marital_status_label(raw: Option<&str>) -> &'static str {
    match code_key(raw).as_str() {
        "S" => "Single",
        "M" => "Married",
        _ => NOT_AVAILABLE,
    }
}

/// CRM gender code: `F → Female`, `M → Male`, else `n/a`.
pub fn gender_label(raw: Option<&str>) -> &'static str {
    match code_key(raw).as_str() {
        "F" => "Female",
        "M" => "Male",
        _ => NOT_AVAILABLE,
    }
}

/// ERP gender text: `F`/`FEMALE → Female`, `M`/`MALE → Male`, else `n/a`.
pub fn demographic_gender_label(raw: Option<&str>) -> &'static str {
    match code_key(raw).as_str() {
        "F" | "FEMALE" => "Female",
        "M" | "MALE" => "Male",
        _ => NOT_AVAILABLE,
    }
}

/// `M/R/S/T → Mountain/Road/Other Sales/Touring`, else `n/a`.
pub fn product_line_label(raw: Option<&str>) -> &'static str {
    match code_key(raw).as_str() {
        "M" => "Mountain",
        "R" => "Road",
        "S" => "Other Sales",
        "T" => "Touring",
        _ => NOT_AVAILABLE,
    }
}

/// Expand country codes; blank or absent becomes `n/a`.
pub fn country_label(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match trimmed.to_ascii_uppercase().as_str() {
        "DE" => "Germany".to_string(),
        "US" | "USA" => "United States".to_string(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_codes_are_trimmed_and_case_insensitive() {
        assert_eq!(gender_label(Some(" f ")), "Female");
        assert_eq!(gender_label(Some("M")), "Male");
        assert_eq!(gender_label(Some("X")), "n/a");
        assert_eq!(gender_label(None), "n/a");
    }

    #[test]
    fn demographic_gender_accepts_words() {
        assert_eq!(demographic_gender_label(Some("female ")), "Female");
        assert_eq!(demographic_gender_label(Some("MALE")), "Male");
        assert_eq!(demographic_gender_label(Some("")), "n/a");
    }

    #[test]
    fn product_lines() {
        assert_eq!(product_line_label(Some("R ")), "Road");
        assert_eq!(product_line_label(Some("s")), "Other Sales");
        assert_eq!(product_line_label(Some("T")), "Touring");
        assert_eq!(product_line_label(Some("M")), "Mountain");
        assert_eq!(product_line_label(None), "n/a");
    }

    #[test]
    fn countries() {
        assert_eq!(country_label(Some("US")), "United States");
        assert_eq!(country_label(Some("USA ")), "United States");
        assert_eq!(country_label(Some("DE")), "Germany");
        assert_eq!(country_label(Some(" France ")), "France");
        assert_eq!(country_label(Some("   ")), "n/a");
        assert_eq!(country_label(None), "n/a");
    }
}
