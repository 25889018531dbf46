use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use crate::features::courts::{CourtLevel, CourtStation};
use crate::features::records::dtos::CreateRecordDto;
use crate::features::records::models::{
    ComplianceVerdict, EditContext, GpPublicationStatus, NewProbateRecord, OfficerRef,
    ProbateRecord, RejectionVocabulary,
};
use crate::features::records::services::RecordValidator;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn edited_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap()
}

pub fn court(name: &str) -> CourtStation {
    CourtStation::new(Uuid::new_v4(), name, CourtLevel::HighCourt)
}

pub fn officer() -> OfficerRef {
    OfficerRef {
        id: "officer-001".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Mutua".to_string(),
    }
}

pub fn ctx() -> EditContext {
    EditContext::new(Some(officer()), edited_at())
}

pub fn validator() -> RecordValidator {
    RecordValidator::new(Arc::new(RejectionVocabulary::default()))
}

fn deceased_name() -> String {
    Name().fake::<String>().to_uppercase()
}

/// Approved record with only the mandatory date set
pub fn sample_record(date_received: NaiveDate) -> ProbateRecord {
    ProbateRecord {
        id: Uuid::new_v4(),
        sequence_number: 1,
        cause_number: "E123 of 2024".to_string(),
        deceased_name: deceased_name(),
        court_station: court("Nairobi Milimani"),
        date_received,
        date_of_receipt: None,
        date_forwarded_to_gp: None,
        compliance_verdict: ComplianceVerdict::Approved,
        rejection_reason: None,
        gp_publication_status: GpPublicationStatus::Pending,
        receiving_lead_time_days: None,
        forwarding_lead_time_days: None,
        volume_no: None,
        date_published: None,
        kpi_alert_sent: false,
        last_modified_by: None,
        last_edit_action: None,
        last_modified_at: edited_at(),
    }
}

pub fn forwarded_record(date_received: NaiveDate, forwarded: NaiveDate) -> ProbateRecord {
    let mut record = sample_record(date_received);
    record.date_forwarded_to_gp = Some(forwarded);
    record.refresh_lead_times();
    record
}

pub fn rejected_record(date_received: NaiveDate, reason: &str) -> ProbateRecord {
    let mut record = sample_record(date_received);
    record.compliance_verdict = ComplianceVerdict::Rejected;
    record.rejection_reason = Some(reason.to_string());
    record
}

/// Valid create request with no optional dates or rejection reason
pub fn create_dto(date_received: NaiveDate, verdict: ComplianceVerdict) -> CreateRecordDto {
    CreateRecordDto {
        cause_number: "E123 of 2024".to_string(),
        deceased_name: deceased_name(),
        court_station: Some(court("Nairobi Milimani")),
        date_received: Some(date_received),
        compliance_verdict: Some(verdict),
        ..CreateRecordDto::default()
    }
}

pub fn into_record(record: NewProbateRecord) -> ProbateRecord {
    record.into_record(Uuid::new_v4(), 1)
}
