use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::courts::{CourtLevel, CourtStation};
use crate::features::records::models::{
    ComplianceVerdict, GpPublicationStatus, NewProbateRecord, OfficerRef, ProbateRecord,
};
use crate::features::records::store::RecordStore;

const SELECT_RECORD: &str = r#"
    SELECT
        r.id, r.sequence_number, r.cause_number, r.deceased_name,
        c.id AS court_id, c.name AS court_name, c.level AS court_level,
        r.date_received, r.date_of_receipt, r.date_forwarded_to_gp,
        r.compliance_verdict, r.rejection_reason, r.gp_publication_status,
        r.receiving_lead_time_days, r.forwarding_lead_time_days,
        r.volume_no, r.date_published, r.kpi_alert_sent,
        r.last_modified_by_id, r.last_modified_by_first_name, r.last_modified_by_last_name,
        r.last_edit_action, r.last_modified_at
    FROM probate_records r
    JOIN court_stations c ON c.id = r.court_station_id
"#;

/// Database row for a record joined with its court station
#[derive(Debug, Clone, FromRow)]
struct ProbateRecordRow {
    id: Uuid,
    sequence_number: i64,
    cause_number: String,
    deceased_name: String,
    court_id: Uuid,
    court_name: String,
    court_level: CourtLevel,
    date_received: NaiveDate,
    date_of_receipt: Option<NaiveDate>,
    date_forwarded_to_gp: Option<NaiveDate>,
    compliance_verdict: ComplianceVerdict,
    rejection_reason: Option<String>,
    gp_publication_status: GpPublicationStatus,
    receiving_lead_time_days: Option<i64>,
    forwarding_lead_time_days: Option<i64>,
    volume_no: Option<String>,
    date_published: Option<NaiveDate>,
    kpi_alert_sent: bool,
    last_modified_by_id: Option<String>,
    last_modified_by_first_name: Option<String>,
    last_modified_by_last_name: Option<String>,
    last_edit_action: Option<String>,
    last_modified_at: DateTime<Utc>,
}

impl From<ProbateRecordRow> for ProbateRecord {
    fn from(row: ProbateRecordRow) -> Self {
        let last_modified_by = row.last_modified_by_id.map(|id| OfficerRef {
            id,
            first_name: row.last_modified_by_first_name.unwrap_or_default(),
            last_name: row.last_modified_by_last_name.unwrap_or_default(),
        });

        Self {
            id: row.id,
            sequence_number: row.sequence_number,
            cause_number: row.cause_number,
            deceased_name: row.deceased_name,
            court_station: CourtStation::new(row.court_id, row.court_name, row.court_level),
            date_received: row.date_received,
            date_of_receipt: row.date_of_receipt,
            date_forwarded_to_gp: row.date_forwarded_to_gp,
            compliance_verdict: row.compliance_verdict,
            rejection_reason: row.rejection_reason,
            gp_publication_status: row.gp_publication_status,
            receiving_lead_time_days: row.receiving_lead_time_days,
            forwarding_lead_time_days: row.forwarding_lead_time_days,
            volume_no: row.volume_no,
            date_published: row.date_published,
            kpi_alert_sent: row.kpi_alert_sent,
            last_modified_by,
            last_edit_action: row.last_edit_action,
            last_modified_at: row.last_modified_at,
        }
    }
}

/// PostgreSQL-backed record store
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one(&self, id: Uuid) -> Result<Option<ProbateRecord>> {
        let sql = format!("{} WHERE r.id = $1", SELECT_RECORD);
        let row = sqlx::query_as::<_, ProbateRecordRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch record {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: NewProbateRecord) -> Result<ProbateRecord> {
        let id = Uuid::now_v7();
        let officer = record.last_modified_by.as_ref();

        sqlx::query(
            r#"
            INSERT INTO probate_records (
                id, cause_number, deceased_name, court_station_id,
                date_received, date_of_receipt, date_forwarded_to_gp,
                compliance_verdict, rejection_reason,
                receiving_lead_time_days, forwarding_lead_time_days,
                last_modified_by_id, last_modified_by_first_name, last_modified_by_last_name,
                last_edit_action, last_modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(id)
        .bind(&record.cause_number)
        .bind(&record.deceased_name)
        .bind(record.court_station.id)
        .bind(record.date_received)
        .bind(record.date_of_receipt)
        .bind(record.date_forwarded_to_gp)
        .bind(record.compliance_verdict)
        .bind(&record.rejection_reason)
        .bind(record.receiving_lead_time_days)
        .bind(record.forwarding_lead_time_days)
        .bind(officer.map(|o| o.id.clone()))
        .bind(officer.map(|o| o.first_name.clone()))
        .bind(officer.map(|o| o.last_name.clone()))
        .bind(&record.last_edit_action)
        .bind(record.last_modified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert record: {:?}", e);
            AppError::Database(e)
        })?;

        self.fetch_one(id)
            .await?
            .ok_or_else(|| AppError::Persistence(format!("Record {} vanished after insert", id)))
    }

    async fn get(&self, id: Uuid) -> Result<Option<ProbateRecord>> {
        self.fetch_one(id).await
    }

    async fn list(&self) -> Result<Vec<ProbateRecord>> {
        let sql = format!("{} ORDER BY r.sequence_number DESC", SELECT_RECORD);
        let rows = sqlx::query_as::<_, ProbateRecordRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list records: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save(&self, record: &ProbateRecord) -> Result<ProbateRecord> {
        let officer = record.last_modified_by.as_ref();

        let result = sqlx::query(
            r#"
            UPDATE probate_records SET
                cause_number = $2,
                deceased_name = $3,
                court_station_id = $4,
                date_received = $5,
                date_of_receipt = $6,
                date_forwarded_to_gp = $7,
                compliance_verdict = $8,
                rejection_reason = $9,
                gp_publication_status = $10,
                receiving_lead_time_days = $11,
                forwarding_lead_time_days = $12,
                volume_no = $13,
                date_published = $14,
                kpi_alert_sent = $15,
                last_modified_by_id = $16,
                last_modified_by_first_name = $17,
                last_modified_by_last_name = $18,
                last_edit_action = $19,
                last_modified_at = $20
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.cause_number)
        .bind(&record.deceased_name)
        .bind(record.court_station.id)
        .bind(record.date_received)
        .bind(record.date_of_receipt)
        .bind(record.date_forwarded_to_gp)
        .bind(record.compliance_verdict)
        .bind(&record.rejection_reason)
        .bind(record.gp_publication_status)
        .bind(record.receiving_lead_time_days)
        .bind(record.forwarding_lead_time_days)
        .bind(&record.volume_no)
        .bind(record.date_published)
        .bind(record.kpi_alert_sent)
        .bind(officer.map(|o| o.id.clone()))
        .bind(officer.map(|o| o.first_name.clone()))
        .bind(officer.map(|o| o.last_name.clone()))
        .bind(&record.last_edit_action)
        .bind(record.last_modified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update record {}: {:?}", record.id, e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Record {} not found", record.id)));
        }

        self.fetch_one(record.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Record {} not found", record.id)))
    }
}
