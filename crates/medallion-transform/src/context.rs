use chrono::{Local, NaiveDate, NaiveDateTime};

/// Batch-wide values every cleansing rule sees.
///
/// Fixing both values makes a reload reproducible: two runs over the same
/// bronze data with the same context produce identical silver frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadContext {
    /// Stamped into the `dwh_create_date` audit column.
    pub loaded_at: NaiveDateTime,
    /// Reference date for "in the future" rules.
    pub as_of: NaiveDate,
}

impl LoadContext {
    pub fn new(loaded_at: NaiveDateTime) -> Self {
        Self {
            loaded_at,
            as_of: loaded_at.date(),
        }
    }

    /// Context stamped with the current local time.
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    #[must_use]
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }
}
