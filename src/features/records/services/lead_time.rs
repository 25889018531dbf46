//! Lead-time and KPI calculations.
//!
//! Every lead time shown or stored anywhere is produced here. All functions
//! are pure and deterministic.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::core::config::ComplianceConfig;
use crate::features::records::dtos::RecordSummary;
use crate::features::records::models::{ComplianceVerdict, ProbateRecord};
use crate::shared::constants::{
    FORWARDING_DISPLAY_TARGET_DAYS, KPI_BREACH_THRESHOLD_DAYS, RECEIVING_DISPLAY_TARGET_DAYS,
};

/// Whole calendar days from `start` to `end`, clamped at zero.
///
/// Calendar dates carry no time of day, so the difference is already a whole
/// number of days and equals its own ceiling.
fn whole_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}

/// Days from registry entry to the e-Citizen receipt date; `None` without a receipt date
pub fn compute_receiving_lead_time(
    date_received: NaiveDate,
    date_of_receipt: Option<NaiveDate>,
) -> Option<i64> {
    date_of_receipt.map(|receipt| whole_days_between(date_received, receipt))
}

/// Days from registry entry to dispatch to the Government Printer; `None` until forwarded
pub fn compute_forwarding_lead_time(
    date_received: NaiveDate,
    date_forwarded_to_gp: Option<NaiveDate>,
) -> Option<i64> {
    date_forwarded_to_gp.map(|forwarded| whole_days_between(date_received, forwarded))
}

/// KPI breach against the fixed 30-day threshold
pub fn is_kpi_breach(lead_time_days: Option<i64>) -> bool {
    ComplianceThresholds::default().is_kpi_breach(lead_time_days)
}

/// Colour band for dashboards. Only `KpiBreach` means escalation; the
/// target bands are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeadTimeBand {
    Unknown,
    OnTarget,
    OverTarget,
    KpiBreach,
}

/// Display bands for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBands {
    pub record_id: Uuid,
    pub receiving: LeadTimeBand,
    pub forwarding: LeadTimeBand,
}

/// Threshold set used by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceThresholds {
    pub kpi_breach_days: i64,
    pub receiving_target_days: i64,
    pub forwarding_target_days: i64,
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            kpi_breach_days: KPI_BREACH_THRESHOLD_DAYS,
            receiving_target_days: RECEIVING_DISPLAY_TARGET_DAYS,
            forwarding_target_days: FORWARDING_DISPLAY_TARGET_DAYS,
        }
    }
}

impl From<&ComplianceConfig> for ComplianceThresholds {
    fn from(config: &ComplianceConfig) -> Self {
        Self {
            kpi_breach_days: config.kpi_breach_days,
            receiving_target_days: config.receiving_target_days,
            forwarding_target_days: config.forwarding_target_days,
        }
    }
}

impl ComplianceThresholds {
    pub fn is_kpi_breach(&self, lead_time_days: Option<i64>) -> bool {
        lead_time_days.is_some_and(|days| days > self.kpi_breach_days)
    }

    /// A record breaches when either of its lead times does
    pub fn record_in_breach(&self, record: &ProbateRecord) -> bool {
        self.is_kpi_breach(record.receiving_lead_time_days)
            || self.is_kpi_breach(record.forwarding_lead_time_days)
    }

    pub fn classify_receiving(&self, lead_time_days: Option<i64>) -> LeadTimeBand {
        self.classify(lead_time_days, self.receiving_target_days)
    }

    pub fn classify_forwarding(&self, lead_time_days: Option<i64>) -> LeadTimeBand {
        self.classify(lead_time_days, self.forwarding_target_days)
    }

    pub fn bands(&self, record: &ProbateRecord) -> RecordBands {
        RecordBands {
            record_id: record.id,
            receiving: self.classify_receiving(record.receiving_lead_time_days),
            forwarding: self.classify_forwarding(record.forwarding_lead_time_days),
        }
    }

    fn classify(&self, lead_time_days: Option<i64>, target: i64) -> LeadTimeBand {
        match lead_time_days {
            None => LeadTimeBand::Unknown,
            Some(_) if self.is_kpi_breach(lead_time_days) => LeadTimeBand::KpiBreach,
            Some(days) if days > target => LeadTimeBand::OverTarget,
            Some(_) => LeadTimeBand::OnTarget,
        }
    }

    pub fn summarize(&self, records: &[ProbateRecord]) -> RecordSummary {
        let mut summary = RecordSummary {
            total: records.len(),
            ..RecordSummary::default()
        };

        for record in records {
            match record.compliance_verdict {
                ComplianceVerdict::Approved => summary.approved_count += 1,
                ComplianceVerdict::Rejected => summary.rejected_count += 1,
            }
            if !record.is_forwarded() {
                summary.pending_forwarding_count += 1;
            }
            if self.record_in_breach(record) {
                summary.kpi_breach_count += 1;
            }
        }

        summary.average_forwarding_lead_time_days =
            average(records.iter().filter_map(|r| r.forwarding_lead_time_days));
        summary
    }
}

/// Summary with the default thresholds
pub fn summarize(records: &[ProbateRecord]) -> RecordSummary {
    ComplianceThresholds::default().summarize(records)
}

/// Mean of the values, `None` for an empty input rather than zero
pub(crate) fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = i64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0i64, 0usize), |(sum, count), v| (sum + v, count + 1));

    (count > 0).then(|| sum as f64 / count as f64)
}
