use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{from_validation_errors, AppError, Result, ValidationError};
use crate::features::records::dtos::{
    BatchResult, BulkForwardDto, CourtPerformance, CreateRecordDto, GazetteMatch, RecordFilter,
    RecordStats, RecordSummary, SkipReason, UpdateRecordDto,
};
use crate::features::records::models::{
    EditContext, GpPublicationStatus, OfficerRef, ProbateRecord, RejectionVocabulary,
};
use crate::features::records::services::analytics;
use crate::features::records::services::bulk_forward::BulkForwardProcessor;
use crate::features::records::services::lead_time::{ComplianceThresholds, RecordBands};
use crate::features::records::services::record_validator::RecordValidator;
use crate::features::records::store::RecordStore;
use crate::shared::constants::{EDIT_ACTION_KPI_ALERT, EDIT_ACTION_PUBLISHED};
use crate::shared::validation::{is_blank, normalize_text};

/// Service for the probate record lifecycle
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    validator: RecordValidator,
    forwarder: BulkForwardProcessor,
    thresholds: ComplianceThresholds,
}

impl RecordService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        vocabulary: Arc<RejectionVocabulary>,
        thresholds: ComplianceThresholds,
    ) -> Self {
        Self {
            forwarder: BulkForwardProcessor::new(store.clone()),
            validator: RecordValidator::new(vocabulary),
            store,
            thresholds,
        }
    }

    /// Register a new record
    pub async fn create(
        &self,
        dto: CreateRecordDto,
        officer: Option<OfficerRef>,
    ) -> Result<ProbateRecord> {
        let ctx = EditContext::now(officer);
        let new_record = self
            .validator
            .validate_for_create(&dto, &ctx)
            .map_err(AppError::Validation)?;

        let record = self.store.insert(new_record).await?;

        tracing::info!(
            "Probate record created: id={}, no={}, cause={}",
            record.id,
            record.sequence_number,
            record.cause_number
        );
        Ok(record)
    }

    /// Apply a partial edit to an existing record
    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateRecordDto,
        officer: Option<OfficerRef>,
    ) -> Result<ProbateRecord> {
        let existing = self.get(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let ctx = EditContext::now(officer);
        let merged = self
            .validator
            .validate_for_update(&existing, &patch, &ctx)
            .map_err(AppError::Validation)?;

        let record = self.store.save(&merged).await?;

        tracing::info!("Probate record updated: id={}", record.id);
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<ProbateRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Record {} not found", id)))
    }

    /// Records matching `filter`, newest registry entry first
    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<ProbateRecord>> {
        let records = self.store.list().await?;
        Ok(filter.apply(&records))
    }

    /// Forwarding queue: matching records that have not gone to the Government Printer
    pub async fn not_forwarded(&self, filter: &RecordFilter) -> Result<Vec<ProbateRecord>> {
        let filter = RecordFilter {
            not_forwarded_only: true,
            ..filter.clone()
        };
        self.list(&filter).await
    }

    /// Forward a selection of records on one date.
    ///
    /// An empty selection is an input error; per-record failures are reported
    /// in the result.
    pub async fn forward_batch(
        &self,
        dto: BulkForwardDto,
        officer: Option<OfficerRef>,
    ) -> Result<BatchResult> {
        dto.validate()
            .map_err(|e| AppError::Validation(from_validation_errors(&e)))?;

        let ctx = EditContext::now(officer);
        Ok(self.forwarder.forward_batch(&dto.ids, dto.date, &ctx).await)
    }

    pub async fn summary(&self, filter: &RecordFilter) -> Result<RecordSummary> {
        let records = self.list(filter).await?;
        Ok(self.thresholds.summarize(&records))
    }

    pub async fn stats(&self) -> Result<RecordStats> {
        let records = self.store.list().await?;
        Ok(analytics::record_stats(&records, &self.thresholds))
    }

    /// Per-station performance over the records matching `filter`
    pub async fn court_performance(&self, filter: &RecordFilter) -> Result<Vec<CourtPerformance>> {
        let records = self.list(filter).await?;
        Ok(analytics::court_performance(&records))
    }

    /// Display bands for every matching record, newest first
    pub async fn lead_time_bands(&self, filter: &RecordFilter) -> Result<Vec<RecordBands>> {
        let records = self.list(filter).await?;
        Ok(records.iter().map(|r| self.thresholds.bands(r)).collect())
    }

    /// Mark records as published from gazette notices matched by the scanner.
    ///
    /// A record that is already published keeps its status; a later notice
    /// only replaces the volume and publication date.
    pub async fn apply_gazette_matches(
        &self,
        matches: Vec<GazetteMatch>,
        officer: Option<OfficerRef>,
    ) -> Result<BatchResult> {
        let mut errors = Vec::new();
        for m in &matches {
            if let Err(e) = m.validate() {
                errors.extend(from_validation_errors(&e));
            } else if is_blank(&m.volume_no) {
                errors.push(ValidationError::new(
                    "volume_no",
                    "Volume number must not be blank",
                ));
            }
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let ctx = EditContext::now(officer);
        let mut result = BatchResult::default();

        for m in matches {
            match self.publish_one(&m, &ctx).await {
                Ok(record) => result.applied(record),
                Err(reason) => {
                    tracing::warn!("Gazette match for {} not applied: {}", m.record_id, reason);
                    result.skip(m.record_id, reason);
                }
            }
        }

        tracing::info!(
            "Gazette intake: applied={}, skipped={}",
            result.applied_ids.len(),
            result.skipped.len()
        );
        Ok(result)
    }

    async fn publish_one(
        &self,
        m: &GazetteMatch,
        ctx: &EditContext,
    ) -> std::result::Result<ProbateRecord, SkipReason> {
        let mut record = self
            .store
            .get(m.record_id)
            .await
            .map_err(|e| SkipReason::Persistence(e.to_string()))?
            .ok_or(SkipReason::NotFound)?;

        let forwarded = record
            .date_forwarded_to_gp
            .ok_or(SkipReason::NotForwarded)?;
        if m.date_published < forwarded {
            return Err(SkipReason::PublicationPrecedesForwarding);
        }

        let volume_no = normalize_text(&m.volume_no);
        if record.gp_publication_status == GpPublicationStatus::Published
            && record.volume_no.as_deref() == Some(volume_no.as_str())
            && record.date_published == Some(m.date_published)
        {
            return Ok(record);
        }

        record.gp_publication_status = GpPublicationStatus::Published;
        record.volume_no = Some(volume_no);
        record.date_published = Some(m.date_published);
        record.stamp(ctx, EDIT_ACTION_PUBLISHED);

        self.store
            .save(&record)
            .await
            .map_err(|e| SkipReason::Persistence(e.to_string()))
    }

    /// Breached records still waiting for an escalation notice
    pub async fn kpi_escalations(&self) -> Result<Vec<ProbateRecord>> {
        let records = self.store.list().await?;
        Ok(analytics::kpi_escalations(&records, &self.thresholds))
    }

    /// Record that the escalation notice for `id` went out
    pub async fn mark_kpi_alert_sent(
        &self,
        id: Uuid,
        officer: Option<OfficerRef>,
    ) -> Result<ProbateRecord> {
        let mut record = self.get(id).await?;
        if record.kpi_alert_sent {
            return Ok(record);
        }

        record.kpi_alert_sent = true;
        record.stamp(&EditContext::now(officer), EDIT_ACTION_KPI_ALERT);
        let record = self.store.save(&record).await?;

        tracing::info!("KPI escalation recorded for record {}", record.id);
        Ok(record)
    }
}
