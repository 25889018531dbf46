use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::records::models::{NewProbateRecord, ProbateRecord};
use crate::features::records::store::RecordStore;

/// Process-local store used by the CLI and tests
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<ProbateRecord>,
    last_sequence: i64,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records; new inserts continue after the highest sequence number
    pub fn with_records(records: Vec<ProbateRecord>) -> Self {
        let last_sequence = records
            .iter()
            .map(|r| r.sequence_number)
            .max()
            .unwrap_or(0);

        Self {
            inner: RwLock::new(Inner {
                records,
                last_sequence,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, record: NewProbateRecord) -> Result<ProbateRecord> {
        let mut inner = self.inner.write().await;
        inner.last_sequence += 1;
        let record = record.into_record(Uuid::now_v7(), inner.last_sequence);
        inner.records.push(record.clone());

        tracing::debug!(
            "Stored record in memory: id={}, no={}",
            record.id,
            record.sequence_number
        );
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ProbateRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<ProbateRecord>> {
        let inner = self.inner.read().await;
        let mut records = inner.records.clone();
        records.sort_by(|a, b| b.sequence_number.cmp(&a.sequence_number));
        Ok(records)
    }

    async fn save(&self, record: &ProbateRecord) -> Result<ProbateRecord> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| AppError::NotFound(format!("Record {} not found", record.id)))?;
        *slot = record.clone();
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::records::models::ComplianceVerdict;
    use crate::shared::test_helpers::{create_dto, ctx, date, sample_record, validator};

    #[tokio::test]
    async fn test_insert_assigns_increasing_sequence_numbers() {
        let store = InMemoryRecordStore::new();
        let v = validator();
        let dto = create_dto(date(2024, 3, 1), ComplianceVerdict::Approved);

        let first = store
            .insert(v.validate_for_create(&dto, &ctx()).unwrap())
            .await
            .unwrap();
        let second = store
            .insert(v.validate_for_create(&dto, &ctx()).unwrap())
            .await
            .unwrap();

        assert_eq!(first.sequence_number, 1);
        assert_eq!(second.sequence_number, 2);
        assert_ne!(first.id, second.id);

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].id, second.id);
    }

    #[tokio::test]
    async fn test_seeded_store_continues_sequence() {
        let mut seeded = sample_record(date(2024, 3, 1));
        seeded.sequence_number = 41;
        let store = InMemoryRecordStore::with_records(vec![seeded]);

        let dto = create_dto(date(2024, 3, 2), ComplianceVerdict::Approved);
        let record = store
            .insert(validator().validate_for_create(&dto, &ctx()).unwrap())
            .await
            .unwrap();
        assert_eq!(record.sequence_number, 42);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_save_unknown_record_is_not_found() {
        let store = InMemoryRecordStore::new();
        let record = sample_record(date(2024, 3, 1));

        let result = store.save(&record).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.is_empty().await);
    }
}
