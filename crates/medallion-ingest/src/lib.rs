//! Source extract ingestion for the bronze layer.
//!
//! - **csv_table**: reading comma separated extracts
//! - **raw**: typed bronze frames from extracts
//! - **discovery**: locating extracts under a source root
//! - **polars_utils**: AnyValue conversion and column/frame helpers
//! - **dates**: the ISO date text format used by every stored date

pub mod csv_table;
pub mod dates;
pub mod discovery;
pub mod error;
pub mod polars_utils;
pub mod raw;

pub use csv_table::{CsvTable, read_csv_table};
pub use dates::{format_date, format_datetime, parse_iso_date, parse_iso_datetime};
pub use discovery::{SourceFile, discover_source_files, missing_source_files};
pub use error::IngestError;
pub use polars_utils::{
    ColumnValues, any_to_i64, any_to_opt_string, any_to_string, build_frame, date_values,
    empty_frame, format_numeric, int_values, parse_i64, text_values,
};
pub use raw::{read_raw_table, table_to_frame};
