//! Silver layer cleansing rules.
//!
//! This crate turns bronze frames into standardized silver frames:
//!
//! - **normalization**: column-level rules (code labels, compact dates, key
//!   derivations, sales repair)
//! - **cleanse**: per-table rule sets combining the column rules with
//!   deduplication and validity period windows
//! - **context**: the batch load timestamp and as-of date

pub mod cleanse;
pub mod context;
pub mod error;
pub mod normalization;

pub use cleanse::cleanse_table;
pub use context::LoadContext;
pub use error::TransformError;
