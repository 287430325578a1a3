//! Data model for the facility directory core.
//!
//! Plain-data entity types shared by ingestion, matching and alias
//! resolution. Behavior lives in the sibling crates; this crate only defines
//! shapes and their serde representations.

pub mod facility;
pub mod master;
pub mod query;

pub use facility::{
    BedCounts, ClosedDays, DAY_LABELS, FacilityClass, FacilityRecord, PERIODIC_WEEKS,
    ScheduleEntry,
};
pub use master::MasterRecord;
pub use query::QueryRecord;
