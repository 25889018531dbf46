use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use crate::core::error::{from_validation_errors, ValidationError};
use crate::features::records::dtos::{CreateRecordDto, UpdateRecordDto};
use crate::features::records::models::{
    ComplianceVerdict, EditContext, NewProbateRecord, ProbateRecord, RejectionVocabulary,
};
use crate::features::records::services::lead_time::{
    compute_forwarding_lead_time, compute_receiving_lead_time,
};
use crate::shared::constants::{EDIT_ACTION_CREATED, EDIT_ACTION_UPDATED};
use crate::shared::validation::{comparison_key, is_blank, normalize_text};

/// Gatekeeper for record creation and edits.
///
/// Reports every failing field at once and never partially applies input.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    vocabulary: Arc<RejectionVocabulary>,
}

impl RecordValidator {
    pub fn new(vocabulary: Arc<RejectionVocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Check a new submission and derive its lead times
    pub fn validate_for_create(
        &self,
        input: &CreateRecordDto,
        ctx: &EditContext,
    ) -> Result<NewProbateRecord, Vec<ValidationError>> {
        let mut errors = shape_errors(input.validate());

        let cause_number = normalize_text(&input.cause_number);
        require_text(&mut errors, "cause_number", &input.cause_number, "Cause number");
        let deceased_name = normalize_text(&input.deceased_name);
        require_text(&mut errors, "deceased_name", &input.deceased_name, "Name of deceased");

        if let Some(received) = input.date_received {
            check_dates(
                &mut errors,
                received,
                input.date_of_receipt,
                input.date_forwarded_to_gp,
                None,
            );
        }

        let rejection_reason = match input.compliance_verdict {
            Some(verdict) => self.resolve_reason(
                &mut errors,
                verdict,
                input.rejection_reason.as_deref(),
                input.custom_rejection.as_deref(),
                None,
            ),
            None => None,
        };

        match (
            &input.court_station,
            input.date_received,
            input.compliance_verdict,
        ) {
            (Some(court_station), Some(date_received), Some(compliance_verdict))
                if errors.is_empty() =>
            {
                Ok(NewProbateRecord {
                    cause_number,
                    deceased_name,
                    court_station: court_station.clone(),
                    date_received,
                    date_of_receipt: input.date_of_receipt,
                    date_forwarded_to_gp: input.date_forwarded_to_gp,
                    compliance_verdict,
                    rejection_reason,
                    receiving_lead_time_days: compute_receiving_lead_time(
                        date_received,
                        input.date_of_receipt,
                    ),
                    forwarding_lead_time_days: compute_forwarding_lead_time(
                        date_received,
                        input.date_forwarded_to_gp,
                    ),
                    last_modified_by: ctx.officer.clone(),
                    last_edit_action: Some(EDIT_ACTION_CREATED.to_string()),
                    last_modified_at: ctx.at,
                })
            }
            _ => Err(errors),
        }
    }

    /// Merge a patch into an existing record and check the result.
    ///
    /// A verdict that is no longer `Rejected` drops the stored reason.
    pub fn validate_for_update(
        &self,
        existing: &ProbateRecord,
        patch: &UpdateRecordDto,
        ctx: &EditContext,
    ) -> Result<ProbateRecord, Vec<ValidationError>> {
        if patch.is_empty() {
            return Ok(existing.clone());
        }

        let mut errors = shape_errors(patch.validate());
        let mut merged = existing.clone();

        if let Some(cause_number) = &patch.cause_number {
            require_text(&mut errors, "cause_number", cause_number, "Cause number");
            merged.cause_number = normalize_text(cause_number);
        }
        if let Some(deceased_name) = &patch.deceased_name {
            require_text(&mut errors, "deceased_name", deceased_name, "Name of deceased");
            merged.deceased_name = normalize_text(deceased_name);
        }
        if let Some(court_station) = &patch.court_station {
            merged.court_station = court_station.clone();
        }

        // Dates are only ever set, never cleared
        merged.date_received = patch.date_received.unwrap_or(existing.date_received);
        merged.date_of_receipt = patch.date_of_receipt.or(existing.date_of_receipt);
        merged.date_forwarded_to_gp = patch.date_forwarded_to_gp.or(existing.date_forwarded_to_gp);
        check_dates(
            &mut errors,
            merged.date_received,
            merged.date_of_receipt,
            merged.date_forwarded_to_gp,
            merged.date_published,
        );

        merged.compliance_verdict = patch
            .compliance_verdict
            .unwrap_or(existing.compliance_verdict);
        let stored_reason = match existing.compliance_verdict {
            ComplianceVerdict::Rejected => existing.rejection_reason.as_deref(),
            ComplianceVerdict::Approved => None,
        };
        merged.rejection_reason = self.resolve_reason(
            &mut errors,
            merged.compliance_verdict,
            patch.rejection_reason.as_deref(),
            patch.custom_rejection.as_deref(),
            stored_reason,
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        merged.refresh_lead_times();
        merged.stamp(ctx, EDIT_ACTION_UPDATED);
        merged.check_invariants()?;
        Ok(merged)
    }

    /// Reason to store for the given verdict. `stored` is the reason already
    /// on the record, kept when a rejected record is edited without a new one.
    fn resolve_reason(
        &self,
        errors: &mut Vec<ValidationError>,
        verdict: ComplianceVerdict,
        reason: Option<&str>,
        custom: Option<&str>,
        stored: Option<&str>,
    ) -> Option<String> {
        let has_custom = custom.is_some_and(|c| !is_blank(c));
        let supplied = reason.is_some_and(|r| !is_blank(r)) || has_custom;
        let resubmitted = !has_custom
            && matches!((reason, stored), (Some(r), Some(s)) if comparison_key(r) == comparison_key(s));

        match verdict {
            ComplianceVerdict::Approved => {
                if supplied {
                    errors.push(ValidationError::new(
                        "rejection_reason",
                        "Approved records must not carry a rejection reason",
                    ));
                }
                None
            }
            ComplianceVerdict::Rejected if !supplied && stored.is_some() => {
                stored.map(str::to_string)
            }
            // Edit forms send the stored text back, which may be free text from "Other"
            ComplianceVerdict::Rejected if resubmitted => stored.map(str::to_string),
            ComplianceVerdict::Rejected => match self.vocabulary.resolve(reason, custom) {
                Ok(resolved) => Some(resolved),
                Err(e) => {
                    errors.push(ValidationError::new("rejection_reason", e.to_string()));
                    None
                }
            },
        }
    }
}

fn shape_errors(result: Result<(), validator::ValidationErrors>) -> Vec<ValidationError> {
    match result {
        Ok(()) => Vec::new(),
        Err(e) => from_validation_errors(&e),
    }
}

/// Whitespace-only text passes the length rule, so catch it here unless the
/// field already failed
fn require_text(errors: &mut Vec<ValidationError>, field: &str, value: &str, label: &str) {
    if is_blank(value) && !errors.iter().any(|e| e.field == field) {
        errors.push(ValidationError::new(
            field,
            format!("{} must not be blank", label),
        ));
    }
}

fn check_dates(
    errors: &mut Vec<ValidationError>,
    date_received: NaiveDate,
    date_of_receipt: Option<NaiveDate>,
    date_forwarded_to_gp: Option<NaiveDate>,
    date_published: Option<NaiveDate>,
) {
    if date_of_receipt.is_some_and(|d| d < date_received) {
        errors.push(ValidationError::new(
            "date_of_receipt",
            "date of receipt precedes date received",
        ));
    }
    if date_forwarded_to_gp.is_some_and(|d| d < date_received) {
        errors.push(ValidationError::new(
            "date_forwarded_to_gp",
            "forward date precedes receipt date",
        ));
    }
    if let (Some(forwarded), Some(published)) = (date_forwarded_to_gp, date_published) {
        if forwarded > published {
            errors.push(ValidationError::new(
                "date_forwarded_to_gp",
                "forward date follows publication date",
            ));
        }
    }
}
