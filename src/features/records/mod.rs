//! Probate record lifecycle and lead-time compliance.
//!
//! A record is registered at the Principal Registry, receives a Form 60
//! compliance verdict, is forwarded to the Government Printer and is finally
//! published in the Kenya Gazette. Lead times measure how long each hop took;
//! anything over 30 days is a KPI breach that must be escalated.
//!
//! ## Operations
//!
//! | Operation | Service method |
//! |-----------|----------------|
//! | Register a record | `RecordService::create` |
//! | Edit a record | `RecordService::update` |
//! | Forward a selection on one date | `RecordService::forward_batch` |
//! | Apply gazette notices | `RecordService::apply_gazette_matches` |
//! | Forwarding queue | `RecordService::not_forwarded` |
//! | Summary, stats, court performance | `RecordService::summary` / `stats` / `court_performance` |
//! | KPI escalations | `RecordService::kpi_escalations` / `mark_kpi_alert_sent` |

pub mod dtos;
pub mod models;
pub mod services;
pub mod store;

pub use models::{ComplianceVerdict, GpPublicationStatus, ProbateRecord, RejectionVocabulary};
pub use services::{ComplianceThresholds, RecordService};
pub use store::{InMemoryRecordStore, PgRecordStore, RecordStore};
