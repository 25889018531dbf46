mod batch_dto;
mod record_dto;
mod stats_dto;

pub use batch_dto::{BatchResult, SkipReason, SkippedRecord};
pub use record_dto::{BulkForwardDto, CreateRecordDto, GazetteMatch, RecordFilter, UpdateRecordDto};
pub use stats_dto::{
    ComplianceCounts, CourtPerformance, GpStatusCounts, LeadTimeAverages, RecordStats,
    RecordSummary,
};
