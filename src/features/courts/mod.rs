//! Court stations referenced by probate records.
//!
//! Stations are maintained by the courts registry; this crate only reads them.

pub mod models;

pub use models::{CourtLevel, CourtStation};
