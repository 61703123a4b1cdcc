//! FILENAME: tree-engine/src/lib.rs
//! Lazy drill-down tree subsystem.
//!
//! This crate holds the partially-materialized tree of result rows behind
//! the drill-down table. It depends on `model` only for shared types
//! (TreeRow, PeriodColumn).
//!
//! Layers:
//! - `store`: the arena-backed tree state (what we have fetched, what is
//!   expanded, what is in flight)
//! - `view`: flattened projections of the store (what we display / export)

pub mod store;
pub mod view;

pub use store::{MergeOutcome, NodeIdx, ToggleOutcome, TreeNode, TreeStore};
pub use view::{flatten, visible, FlatRow};
