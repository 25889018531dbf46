use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::features::courts::CourtStation;
use crate::features::records::models::{ComplianceVerdict, ProbateRecord};
use crate::shared::dates::{deserialize_calendar_date, deserialize_optional_calendar_date};
use crate::shared::validation::comparison_key;

/// Request DTO for registering a new probate record
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordDto {
    /// Free-text case identifier, e.g. "E123 of 2024"
    #[validate(length(min = 1, message = "Cause number is required"))]
    pub cause_number: String,

    #[validate(length(min = 1, message = "Name of deceased is required"))]
    pub deceased_name: String,

    #[validate(required(message = "Court station is required"))]
    pub court_station: Option<CourtStation>,

    #[validate(required(message = "Date received is required"))]
    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub date_received: Option<NaiveDate>,

    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub date_of_receipt: Option<NaiveDate>,

    #[serde(
        default,
        rename = "dateForwardedToGP",
        deserialize_with = "deserialize_optional_calendar_date"
    )]
    pub date_forwarded_to_gp: Option<NaiveDate>,

    #[validate(required(message = "Compliance verdict is required"))]
    pub compliance_verdict: Option<ComplianceVerdict>,

    /// A listed reason, or "Other" together with `custom_rejection`
    pub rejection_reason: Option<String>,

    /// Free text used when `rejection_reason` is "Other"
    pub custom_rejection: Option<String>,
}

/// Request DTO for editing a record; `None` leaves a field unchanged.
///
/// Dates can be set or moved but never cleared through an edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordDto {
    #[validate(length(min = 1, message = "Cause number must not be empty"))]
    pub cause_number: Option<String>,

    #[validate(length(min = 1, message = "Name of deceased must not be empty"))]
    pub deceased_name: Option<String>,

    pub court_station: Option<CourtStation>,

    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub date_received: Option<NaiveDate>,

    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub date_of_receipt: Option<NaiveDate>,

    #[serde(
        default,
        rename = "dateForwardedToGP",
        deserialize_with = "deserialize_optional_calendar_date"
    )]
    pub date_forwarded_to_gp: Option<NaiveDate>,

    pub compliance_verdict: Option<ComplianceVerdict>,

    pub rejection_reason: Option<String>,

    pub custom_rejection: Option<String>,
}

impl UpdateRecordDto {
    pub fn is_empty(&self) -> bool {
        self.cause_number.is_none()
            && self.deceased_name.is_none()
            && self.court_station.is_none()
            && self.date_received.is_none()
            && self.date_of_receipt.is_none()
            && self.date_forwarded_to_gp.is_none()
            && self.compliance_verdict.is_none()
            && self.rejection_reason.is_none()
            && self.custom_rejection.is_none()
    }
}

/// Request DTO for forwarding a selection of records on one date
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkForwardDto {
    #[validate(length(min = 1, message = "No records selected"))]
    pub ids: Vec<Uuid>,

    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
}

/// A gazette notice the external scanner matched to a record
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GazetteMatch {
    pub record_id: Uuid,

    #[validate(length(min = 1, message = "Volume number is required"))]
    pub volume_no: String,

    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date_published: NaiveDate,
}

/// Filters shared by the records table, forwarding queue and reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    pub court_id: Option<Uuid>,
    pub verdict: Option<ComplianceVerdict>,
    /// Only records with no forwarding date
    #[serde(default)]
    pub not_forwarded_only: bool,
    /// Inclusive lower bound on date received
    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub received_from: Option<NaiveDate>,
    /// Inclusive upper bound on date received
    #[serde(default, deserialize_with = "deserialize_optional_calendar_date")]
    pub received_to: Option<NaiveDate>,
    /// Case-insensitive match on deceased name, cause number or court name
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn not_forwarded() -> Self {
        Self {
            not_forwarded_only: true,
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &ProbateRecord) -> bool {
        if let Some(court_id) = self.court_id {
            if record.court_station.id != court_id {
                return false;
            }
        }

        if let Some(verdict) = self.verdict {
            if record.compliance_verdict != verdict {
                return false;
            }
        }

        if self.not_forwarded_only && record.is_forwarded() {
            return false;
        }

        if self.received_from.is_some_and(|from| record.date_received < from) {
            return false;
        }

        if self.received_to.is_some_and(|to| record.date_received > to) {
            return false;
        }

        match self.search.as_deref().map(comparison_key) {
            Some(term) if !term.is_empty() => {
                comparison_key(&record.deceased_name).contains(&term)
                    || comparison_key(&record.cause_number).contains(&term)
                    || comparison_key(&record.court_station.name).contains(&term)
            }
            _ => true,
        }
    }

    /// Matching records, newest registry entry first
    pub fn apply<'a, I>(&self, records: I) -> Vec<ProbateRecord>
    where
        I: IntoIterator<Item = &'a ProbateRecord>,
    {
        let mut out: Vec<ProbateRecord> = records
            .into_iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.sequence_number.cmp(&a.sequence_number));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{court, date, sample_record};

    #[test]
    fn test_create_dto_reports_missing_required_fields() {
        let errors = CreateRecordDto::default().validate().unwrap_err();
        let fields = errors.field_errors();

        for field in [
            "cause_number",
            "deceased_name",
            "court_station",
            "date_received",
            "compliance_verdict",
        ] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_create_dto_deserializes_registry_payload() {
        let dto: CreateRecordDto = serde_json::from_str(
            r#"{
                "causeNumber": "E123 of 2024",
                "deceasedName": "JOHN DOE",
                "dateReceived": "2024-03-01",
                "dateForwardedToGP": "2024-03-05",
                "complianceVerdict": "Rejected",
                "rejectionReason": "Other",
                "customRejection": "Illegible petitioner name"
            }"#,
        )
        .unwrap();

        assert_eq!(dto.date_forwarded_to_gp, Some(date(2024, 3, 5)));
        assert_eq!(dto.compliance_verdict, Some(ComplianceVerdict::Rejected));
        assert!(dto.court_station.is_none());
    }

    #[test]
    fn test_dtos_accept_iso_timestamps_for_dates() {
        let dto: CreateRecordDto = serde_json::from_str(
            r#"{
                "causeNumber": "E123 of 2024",
                "deceasedName": "JOHN DOE",
                "dateReceived": "2024-03-01T00:00:00.000Z",
                "dateOfReceipt": null,
                "complianceVerdict": "Approved"
            }"#,
        )
        .unwrap();
        assert_eq!(dto.date_received, Some(date(2024, 3, 1)));
        assert_eq!(dto.date_of_receipt, None);
        assert_eq!(dto.date_forwarded_to_gp, None);

        let forward: BulkForwardDto = serde_json::from_str(&format!(
            r#"{{"ids": ["{}"], "date": "2024-04-01T10:15:00+03:00"}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert_eq!(forward.date, date(2024, 4, 1));

        let bad = serde_json::from_str::<BulkForwardDto>(r#"{"ids": [], "date": "01/04/2024"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_bulk_forward_requires_selection() {
        let dto = BulkForwardDto {
            ids: vec![],
            date: date(2024, 4, 1),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_filter_search_and_date_range() {
        let mut a = sample_record(date(2024, 3, 1));
        a.sequence_number = 1;
        a.deceased_name = "JANE WANJIKU".to_string();
        let mut b = sample_record(date(2024, 3, 20));
        b.sequence_number = 2;
        b.cause_number = "E77 of 2024".to_string();

        let filter = RecordFilter {
            search: Some("wanjiku".to_string()),
            ..RecordFilter::default()
        };
        assert_eq!(filter.apply([&a, &b]).len(), 1);

        let filter = RecordFilter {
            received_from: Some(date(2024, 3, 1)),
            received_to: Some(date(2024, 3, 20)),
            ..RecordFilter::default()
        };
        let matched = filter.apply([&a, &b]);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].sequence_number, 2);

        let filter = RecordFilter {
            received_to: Some(date(2024, 3, 19)),
            ..RecordFilter::default()
        };
        assert_eq!(filter.apply([&a, &b]).len(), 1);
    }

    #[test]
    fn test_filter_court_and_forwarding_status() {
        let other_court = court("Kisumu High Court");
        let mut a = sample_record(date(2024, 3, 1));
        a.date_forwarded_to_gp = Some(date(2024, 3, 2));
        let mut b = sample_record(date(2024, 3, 1));
        b.court_station = other_court.clone();

        assert_eq!(RecordFilter::not_forwarded().apply([&a, &b]).len(), 1);

        let filter = RecordFilter {
            court_id: Some(other_court.id),
            ..RecordFilter::default()
        };
        let matched = filter.apply([&a, &b]);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, b.id);
    }
}
