use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use uuid::Uuid;

use crate::features::records::dtos::{BatchResult, SkipReason};
use crate::features::records::models::{EditContext, ProbateRecord};
use crate::features::records::store::RecordStore;
use crate::shared::constants::EDIT_ACTION_FORWARDED;

/// Applies "forwarded to the Government Printer on `date`" across many
/// records. Each record is its own unit of work; nothing is rolled back when
/// another record in the batch fails.
pub struct BulkForwardProcessor {
    store: Arc<dyn RecordStore>,
}

impl BulkForwardProcessor {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Forward every distinct id in `ids`, in input order.
    ///
    /// This sets the date unconditionally: a record already forwarded on a
    /// different day is moved to `date`. Re-forwarding on the same day leaves
    /// the record untouched.
    pub async fn forward_batch(
        &self,
        ids: &[Uuid],
        date: NaiveDate,
        ctx: &EditContext,
    ) -> BatchResult {
        let mut seen = HashSet::with_capacity(ids.len());
        let distinct: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let outcomes = join_all(
            distinct
                .iter()
                .map(|&id| async move { (id, self.forward_one(id, date, ctx).await) }),
        )
        .await;

        let mut result = BatchResult::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(record) => result.applied(record),
                Err(reason) => {
                    tracing::warn!("Record {} not forwarded: {}", id, reason);
                    result.skip(id, reason);
                }
            }
        }

        tracing::info!(
            "Forwarding batch for {}: applied={}, skipped={}",
            date,
            result.applied_ids.len(),
            result.skipped.len()
        );
        result
    }

    async fn forward_one(
        &self,
        id: Uuid,
        date: NaiveDate,
        ctx: &EditContext,
    ) -> Result<ProbateRecord, SkipReason> {
        let mut record = self
            .store
            .get(id)
            .await
            .map_err(|e| SkipReason::Persistence(e.to_string()))?
            .ok_or(SkipReason::NotFound)?;

        if date < record.date_received {
            return Err(SkipReason::ForwardDatePrecedesReceipt);
        }
        if record.date_published.is_some_and(|published| date > published) {
            return Err(SkipReason::ForwardDateFollowsPublication);
        }

        match record.date_forwarded_to_gp {
            Some(current) if current == date => return Ok(record),
            Some(current) => tracing::warn!(
                "Record {} already forwarded on {}, overwriting with {}",
                id,
                current,
                date
            ),
            None => {}
        }

        record.date_forwarded_to_gp = Some(date);
        record.refresh_lead_times();
        record.stamp(ctx, EDIT_ACTION_FORWARDED);

        self.store
            .save(&record)
            .await
            .map_err(|e| SkipReason::Persistence(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{AppError, Result};
    use crate::features::records::models::{GpPublicationStatus, NewProbateRecord};
    use crate::features::records::store::InMemoryRecordStore;
    use crate::shared::test_helpers::{ctx, date, sample_record};
    use async_trait::async_trait;

    /// Store whose writes fail for one id
    struct FailingSaveStore {
        inner: InMemoryRecordStore,
        fail_id: Uuid,
    }

    #[async_trait]
    impl RecordStore for FailingSaveStore {
        async fn insert(&self, record: NewProbateRecord) -> Result<ProbateRecord> {
            self.inner.insert(record).await
        }

        async fn get(&self, id: Uuid) -> Result<Option<ProbateRecord>> {
            self.inner.get(id).await
        }

        async fn list(&self) -> Result<Vec<ProbateRecord>> {
            self.inner.list().await
        }

        async fn save(&self, record: &ProbateRecord) -> Result<ProbateRecord> {
            if record.id == self.fail_id {
                return Err(AppError::Persistence("connection reset".to_string()));
            }
            self.inner.save(record).await
        }
    }

    fn processor_with(records: Vec<ProbateRecord>) -> (BulkForwardProcessor, Arc<InMemoryRecordStore>) {
        let store = Arc::new(InMemoryRecordStore::with_records(records));
        (BulkForwardProcessor::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_forward_batch_skips_records_received_after_forward_date() {
        let a = sample_record(date(2024, 3, 1));
        let b = sample_record(date(2024, 5, 1));
        let (processor, _) = processor_with(vec![a.clone(), b.clone()]);

        let result = processor
            .forward_batch(&[a.id, b.id], date(2024, 4, 1), &ctx())
            .await;

        assert_eq!(result.applied_ids, vec![a.id]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].id, b.id);
        assert_eq!(
            result.skipped[0].reason.to_string(),
            "forward date precedes receipt date"
        );
        assert_eq!(result.updated_records[0].forwarding_lead_time_days, Some(31));
        assert_eq!(
            result.updated_records[0].last_edit_action.as_deref(),
            Some(EDIT_ACTION_FORWARDED)
        );
    }

    #[tokio::test]
    async fn test_forward_batch_reports_unknown_ids() {
        let a = sample_record(date(2024, 3, 1));
        let (processor, _) = processor_with(vec![a.clone()]);
        let missing = Uuid::new_v4();

        let result = processor
            .forward_batch(&[missing, a.id], date(2024, 3, 2), &ctx())
            .await;

        assert_eq!(result.applied_ids, vec![a.id]);
        assert_eq!(result.skipped[0].id, missing);
        assert_eq!(result.skipped[0].reason, SkipReason::NotFound);
    }

    #[tokio::test]
    async fn test_forward_batch_same_date_is_identical() {
        let a = sample_record(date(2024, 3, 1));
        let (processor, store) = processor_with(vec![a.clone()]);

        let first = processor
            .forward_batch(&[a.id], date(2024, 3, 20), &ctx())
            .await;
        let stored_after_first = store.get(a.id).await.unwrap().unwrap();

        let later_ctx = EditContext::now(None);
        let second = processor
            .forward_batch(&[a.id], date(2024, 3, 20), &later_ctx)
            .await;
        let stored_after_second = store.get(a.id).await.unwrap().unwrap();

        assert_eq!(first.updated_records, second.updated_records);
        assert_eq!(stored_after_first, stored_after_second);
        assert_eq!(stored_after_second.forwarding_lead_time_days, Some(19));
    }

    #[tokio::test]
    async fn test_forward_batch_overwrites_earlier_forward_date() {
        let mut a = sample_record(date(2024, 3, 1));
        a.date_forwarded_to_gp = Some(date(2024, 3, 2));
        a.refresh_lead_times();
        let (processor, store) = processor_with(vec![a.clone()]);

        let result = processor
            .forward_batch(&[a.id], date(2024, 3, 11), &ctx())
            .await;

        assert!(result.is_complete());
        let stored = store.get(a.id).await.unwrap().unwrap();
        assert_eq!(stored.date_forwarded_to_gp, Some(date(2024, 3, 11)));
        assert_eq!(stored.forwarding_lead_time_days, Some(10));
    }

    #[tokio::test]
    async fn test_forward_batch_never_moves_past_publication_date() {
        let mut published = sample_record(date(2024, 3, 1));
        published.date_forwarded_to_gp = Some(date(2024, 3, 5));
        published.gp_publication_status = GpPublicationStatus::Published;
        published.volume_no = Some("Vol. CXXVI-No. 45".to_string());
        published.date_published = Some(date(2024, 3, 15));
        published.refresh_lead_times();
        let (processor, store) = processor_with(vec![published.clone()]);

        let result = processor
            .forward_batch(&[published.id], date(2024, 4, 30), &ctx())
            .await;

        assert!(result.applied_ids.is_empty());
        assert_eq!(
            result.skipped[0].reason,
            SkipReason::ForwardDateFollowsPublication
        );
        let stored = store.get(published.id).await.unwrap().unwrap();
        assert_eq!(stored.date_forwarded_to_gp, Some(date(2024, 3, 5)));

        let result = processor
            .forward_batch(&[published.id], date(2024, 3, 15), &ctx())
            .await;
        assert!(result.is_complete());
    }

    #[tokio::test]
    async fn test_forward_batch_collapses_duplicate_ids() {
        let a = sample_record(date(2024, 3, 1));
        let (processor, _) = processor_with(vec![a.clone()]);

        let result = processor
            .forward_batch(&[a.id, a.id], date(2024, 3, 2), &ctx())
            .await;

        assert_eq!(result.applied_ids, vec![a.id]);
        assert!(result.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_forward_batch_persistence_failure_does_not_abort_batch() {
        let a = sample_record(date(2024, 3, 1));
        let b = sample_record(date(2024, 3, 1));
        let store = Arc::new(FailingSaveStore {
            inner: InMemoryRecordStore::with_records(vec![a.clone(), b.clone()]),
            fail_id: a.id,
        });
        let processor = BulkForwardProcessor::new(store.clone());

        let result = processor
            .forward_batch(&[a.id, b.id], date(2024, 3, 5), &ctx())
            .await;

        assert_eq!(result.applied_ids, vec![b.id]);
        assert_eq!(result.skipped[0].id, a.id);
        assert!(matches!(result.skipped[0].reason, SkipReason::Persistence(_)));

        let untouched = store.get(a.id).await.unwrap().unwrap();
        assert_eq!(untouched.date_forwarded_to_gp, None);
    }
}
