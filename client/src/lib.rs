//! FILENAME: client/src/lib.rs
//! PURPOSE: Async client for the statistics backend.
//! CONTEXT: Wraps every backend endpoint the dashboard consumes (tree data,
//! filter option lists, indicator passport, saved selections) plus the
//! cascading filter-selection state and the stale-response guard.

pub mod api;
pub mod error;
pub mod filters;
pub mod types;

pub use api::StatClient;
pub use error::ClientError;
pub use filters::{FilterSelection, RequestSlot, RequestToken};
pub use types::{
    Indicator, IndexAttributes, MainClassification, PassportEntry, Period, SavedSelection,
    Segment, SelectionBody, TreeQuery,
};
