//! Layered warehouse store, full-reload loading and gold projections.
//!
//! - **store**: the in-memory bronze and silver tables
//! - **loader**: the truncate-and-insert batch state machine and its sources
//! - **gold**: star schema views computed from silver on read
//! - **keys**: positional and stable surrogate keys

pub mod error;
pub mod gold;
pub mod keys;
pub mod loader;
pub mod store;

pub use error::{Result, WarehouseError};
pub use gold::{GoldFrames, dim_customers, dim_products, fact_sales, project_gold};
pub use keys::{KeyRegistry, SurrogateKeys};
pub use loader::{
    CleansingSource, ExtractSource, FullReloadLoader, LoadState, ReloadOutcome, TableSource,
    run_full_reload,
};
pub use store::{LayerSnapshot, Warehouse};
