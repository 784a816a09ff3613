//! Column-level normalization rules.
//!
//! - **codes**: code-to-label mappings (marital status, gender, product line, country)
//! - **datetime**: compact `YYYYMMDD` integer dates
//! - **keys**: business key derivations
//! - **numeric**: sales amount and price repair

pub mod codes;
pub mod datetime;
pub mod keys;
pub mod numeric;

pub use codes::{
    country_label, demographic_gender_label, gender_label, marital_status_label,
    product_line_label,
};
pub use datetime::parse_compact_date;
pub use keys::{category_code, product_key, strip_dashes, strip_demographic_prefix};
pub use numeric::{SalesFigures, expected_sales, repair_sales_figures};
