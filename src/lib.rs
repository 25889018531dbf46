//! Probate registry core: record lifecycle, lead-time calculations and
//! compliance reporting for the Principal Probate Registry.

pub mod core;
pub mod features;
pub mod shared;
