//! Business key derivations.

/// Length of the category prefix at the start of a raw product key.
pub const CATEGORY_PREFIX_LEN: usize = 5;
/// Characters skipped before the normalized product key (prefix plus separator).
pub const PRODUCT_KEY_OFFSET: usize = 6;
/// Prefix some ERP systems put in front of customer keys.
pub const DEMOGRAPHIC_ID_PREFIX: &str = "NAS";

/// First five characters of a raw product key with `-` replaced by `_`.
///
/// `CO-RF-FR-R92B-58` gives `CO_RF`.
pub fn category_code(raw_key: &str) -> String {
    raw_key
        .chars()
        .take(CATEGORY_PREFIX_LEN)
        .map(|ch| if ch == '-' { '_' } else { ch })
        .collect()
}

/// The raw product key from the seventh character on.
///
/// `CO-RF-FR-R92B-58` gives `FR-R92B-58`; shorter keys give an empty key.
pub fn product_key(raw_key: &str) -> String {
    raw_key.chars().skip(PRODUCT_KEY_OFFSET).collect()
}

/// Strip the `NAS` prefix (any case) from a demographic customer id.
pub fn strip_demographic_prefix(cid: &str) -> String {
    match cid.get(..DEMOGRAPHIC_ID_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DEMOGRAPHIC_ID_PREFIX) => {
            cid[DEMOGRAPHIC_ID_PREFIX.len()..].to_string()
        }
        _ => cid.to_string(),
    }
}

/// Remove every dash from a location customer id.
pub fn strip_dashes(cid: &str) -> String {
    cid.replace('-', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_key_split() {
        assert_eq!(category_code("CO-RF-FR-R92B-58"), "CO_RF");
        assert_eq!(product_key("CO-RF-FR-R92B-58"), "FR-R92B-58");
        assert_eq!(category_code("AC"), "AC");
        assert_eq!(product_key("AC-HE"), "");
    }

    #[test]
    fn demographic_prefix() {
        assert_eq!(strip_demographic_prefix("NASAW00011000"), "AW00011000");
        assert_eq!(strip_demographic_prefix("nasAW00011000"), "AW00011000");
        assert_eq!(strip_demographic_prefix("AW00011000"), "AW00011000");
        assert_eq!(strip_demographic_prefix("NA"), "NA");
    }

    #[test]
    fn location_dashes() {
        assert_eq!(strip_dashes("AW-00011000"), "AW00011000");
    }
}
