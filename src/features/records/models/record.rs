use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

use crate::core::error::ValidationError;
use crate::features::courts::CourtStation;
use crate::shared::dates::{deserialize_calendar_date, deserialize_optional_calendar_date};
use crate::features::records::services::lead_time::{
    compute_forwarding_lead_time, compute_receiving_lead_time,
};

/// Form 60 compliance verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "compliance_verdict", rename_all = "lowercase")]
pub enum ComplianceVerdict {
    Approved,
    Rejected,
}

impl std::fmt::Display for ComplianceVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceVerdict::Approved => write!(f, "Approved"),
            ComplianceVerdict::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Publication status at the Government Printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Type)]
#[sqlx(type_name = "gp_publication_status", rename_all = "lowercase")]
pub enum GpPublicationStatus {
    #[default]
    Pending,
    Published,
}

impl std::fmt::Display for GpPublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpPublicationStatus::Pending => write!(f, "Pending"),
            GpPublicationStatus::Published => write!(f, "Published"),
        }
    }
}

/// Registry officer who last touched a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerRef {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

/// Who is writing and when; stamped onto every record a write produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditContext {
    pub officer: Option<OfficerRef>,
    pub at: DateTime<Utc>,
}

impl EditContext {
    pub fn new(officer: Option<OfficerRef>, at: DateTime<Utc>) -> Self {
        Self { officer, at }
    }

    pub fn now(officer: Option<OfficerRef>) -> Self {
        Self::new(officer, Utc::now())
    }
}

/// Canonical probate record as held by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbateRecord {
    pub id: Uuid,
    pub sequence_number: i64,
    pub cause_number: String,
    pub deceased_name: String,
    pub court_station: CourtStation,
    /// Date the matter physically arrived at the Principal Registry
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date_received: NaiveDate,
    /// Date printed on the e-Citizen payment receipt
    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub date_of_receipt: Option<NaiveDate>,
    /// Date the matter was dispatched to the Government Printer
    #[serde(
        default,
        rename = "dateForwardedToGP",
        deserialize_with = "deserialize_optional_calendar_date"
    )]
    pub date_forwarded_to_gp: Option<NaiveDate>,
    pub compliance_verdict: ComplianceVerdict,
    pub rejection_reason: Option<String>,
    #[serde(default, rename = "gpPublicationStatus")]
    pub gp_publication_status: GpPublicationStatus,
    pub receiving_lead_time_days: Option<i64>,
    pub forwarding_lead_time_days: Option<i64>,
    #[serde(default)]
    pub volume_no: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub date_published: Option<NaiveDate>,
    #[serde(default)]
    pub kpi_alert_sent: bool,
    #[serde(default)]
    pub last_modified_by: Option<OfficerRef>,
    #[serde(default)]
    pub last_edit_action: Option<String>,
    pub last_modified_at: DateTime<Utc>,
}

impl ProbateRecord {
    pub fn is_forwarded(&self) -> bool {
        self.date_forwarded_to_gp.is_some()
    }

    /// Recompute both lead times from the current dates
    pub fn refresh_lead_times(&mut self) {
        self.receiving_lead_time_days =
            compute_receiving_lead_time(self.date_received, self.date_of_receipt);
        self.forwarding_lead_time_days =
            compute_forwarding_lead_time(self.date_received, self.date_forwarded_to_gp);
    }

    pub fn stamp(&mut self, ctx: &EditContext, action: &str) {
        self.last_modified_by = ctx.officer.clone();
        self.last_edit_action = Some(action.to_string());
        self.last_modified_at = ctx.at;
    }

    /// Static invariants every stored record must satisfy
    pub fn check_invariants(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match (self.compliance_verdict, &self.rejection_reason) {
            (ComplianceVerdict::Rejected, None) => errors.push(ValidationError::new(
                "rejection_reason",
                "Rejected records must carry a rejection reason",
            )),
            (ComplianceVerdict::Approved, Some(_)) => errors.push(ValidationError::new(
                "rejection_reason",
                "Approved records must not carry a rejection reason",
            )),
            _ => {}
        }

        if let Some(forwarded) = self.date_forwarded_to_gp {
            if forwarded < self.date_received {
                errors.push(ValidationError::new(
                    "date_forwarded_to_gp",
                    "forward date precedes receipt date",
                ));
            }
        }

        if let (Some(forwarded), Some(published)) = (self.date_forwarded_to_gp, self.date_published) {
            if forwarded > published {
                errors.push(ValidationError::new(
                    "date_forwarded_to_gp",
                    "forward date follows publication date",
                ));
            }
        }

        if self.receiving_lead_time_days
            != compute_receiving_lead_time(self.date_received, self.date_of_receipt)
        {
            errors.push(ValidationError::new(
                "receiving_lead_time_days",
                "Receiving lead time does not match the record dates",
            ));
        }

        if self.forwarding_lead_time_days
            != compute_forwarding_lead_time(self.date_received, self.date_forwarded_to_gp)
        {
            errors.push(ValidationError::new(
                "forwarding_lead_time_days",
                "Forwarding lead time does not match the record dates",
            ));
        }

        if self.gp_publication_status == GpPublicationStatus::Published
            && self.date_forwarded_to_gp.is_none()
        {
            errors.push(ValidationError::new(
                "gp_publication_status",
                "Published records must have been forwarded to the Government Printer",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Validated record that has not been persisted yet; the store assigns
/// `id` and `sequence_number`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProbateRecord {
    pub cause_number: String,
    pub deceased_name: String,
    pub court_station: CourtStation,
    pub date_received: NaiveDate,
    pub date_of_receipt: Option<NaiveDate>,
    pub date_forwarded_to_gp: Option<NaiveDate>,
    pub compliance_verdict: ComplianceVerdict,
    pub rejection_reason: Option<String>,
    pub receiving_lead_time_days: Option<i64>,
    pub forwarding_lead_time_days: Option<i64>,
    pub last_modified_by: Option<OfficerRef>,
    pub last_edit_action: Option<String>,
    pub last_modified_at: DateTime<Utc>,
}

impl NewProbateRecord {
    /// Materialise with store-assigned identity
    pub fn into_record(self, id: Uuid, sequence_number: i64) -> ProbateRecord {
        ProbateRecord {
            id,
            sequence_number,
            cause_number: self.cause_number,
            deceased_name: self.deceased_name,
            court_station: self.court_station,
            date_received: self.date_received,
            date_of_receipt: self.date_of_receipt,
            date_forwarded_to_gp: self.date_forwarded_to_gp,
            compliance_verdict: self.compliance_verdict,
            rejection_reason: self.rejection_reason,
            gp_publication_status: GpPublicationStatus::Pending,
            receiving_lead_time_days: self.receiving_lead_time_days,
            forwarding_lead_time_days: self.forwarding_lead_time_days,
            volume_no: None,
            date_published: None,
            kpi_alert_sent: false,
            last_modified_by: self.last_modified_by,
            last_edit_action: self.last_edit_action,
            last_modified_at: self.last_modified_at,
        }
    }
}
