//! CLI library components for the medallion warehouse.

pub mod export;
pub mod logging;
pub mod pipeline;
