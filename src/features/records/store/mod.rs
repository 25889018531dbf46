//! Persistence seam for probate records.
//!
//! Services receive an `Arc<dyn RecordStore>`; errors from the backing store
//! are handed back unchanged and never retried here.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::records::models::{NewProbateRecord, ProbateRecord};

pub use memory::InMemoryRecordStore;
pub use postgres::PgRecordStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a validated record, assigning its id and sequence number
    async fn insert(&self, record: NewProbateRecord) -> Result<ProbateRecord>;

    async fn get(&self, id: Uuid) -> Result<Option<ProbateRecord>>;

    /// All records, newest sequence number first
    async fn list(&self) -> Result<Vec<ProbateRecord>>;

    /// Replace a single existing record; `NotFound` if it does not exist
    async fn save(&self, record: &ProbateRecord) -> Result<ProbateRecord>;
}
