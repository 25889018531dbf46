use serde::Serialize;
use uuid::Uuid;

use crate::features::records::models::ProbateRecord;

/// Why a record was left out of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum SkipReason {
    NotFound,
    ForwardDatePrecedesReceipt,
    ForwardDateFollowsPublication,
    NotForwarded,
    PublicationPrecedesForwarding,
    Persistence(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "record not found"),
            SkipReason::ForwardDatePrecedesReceipt => {
                write!(f, "forward date precedes receipt date")
            }
            SkipReason::ForwardDateFollowsPublication => {
                write!(f, "forward date follows publication date")
            }
            SkipReason::NotForwarded => {
                write!(f, "record has not been forwarded to the Government Printer")
            }
            SkipReason::PublicationPrecedesForwarding => {
                write!(f, "publication date precedes forward date")
            }
            SkipReason::Persistence(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<SkipReason> for String {
    fn from(reason: SkipReason) -> Self {
        reason.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub id: Uuid,
    pub reason: SkipReason,
}

/// Outcome of a per-record batch transition. Partial success is normal:
/// `applied_ids` and `skipped` together account for every distinct id asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub applied_ids: Vec<Uuid>,
    pub skipped: Vec<SkippedRecord>,
    pub updated_records: Vec<ProbateRecord>,
}

impl BatchResult {
    pub fn applied(&mut self, record: ProbateRecord) {
        self.applied_ids.push(record.id);
        self.updated_records.push(record);
    }

    pub fn skip(&mut self, id: Uuid, reason: SkipReason) {
        self.skipped.push(SkippedRecord { id, reason });
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
