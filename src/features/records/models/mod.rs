mod record;
mod rejection;

pub use record::{
    ComplianceVerdict, EditContext, GpPublicationStatus, NewProbateRecord, OfficerRef,
    ProbateRecord,
};
pub use rejection::{RejectionReasonError, RejectionVocabulary};
