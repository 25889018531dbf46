pub mod analytics;
mod bulk_forward;
pub mod lead_time;
mod record_service;
mod record_validator;

pub use bulk_forward::BulkForwardProcessor;
pub use lead_time::{ComplianceThresholds, LeadTimeBand, RecordBands};
pub use record_service::RecordService;
pub use record_validator::RecordValidator;
