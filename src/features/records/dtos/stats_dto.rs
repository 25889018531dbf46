use serde::Serialize;
use uuid::Uuid;

/// Headline aggregate over a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub total: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    /// Records with no forwarding date yet
    pub pending_forwarding_count: usize,
    /// Mean over records that have a forwarding lead time; `None` when none do
    pub average_forwarding_lead_time_days: Option<f64>,
    pub kpi_breach_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceCounts {
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GpStatusCounts {
    pub pending: usize,
    pub published: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTimeAverages {
    pub receiving_lead_time: Option<f64>,
    pub forwarding_lead_time: Option<f64>,
}

/// Dashboard statistics block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStats {
    pub total: usize,
    pub compliance: ComplianceCounts,
    pub gp_status: GpStatusCounts,
    pub kpi_breaches: usize,
    pub averages: LeadTimeAverages,
}

/// Per-station volume and Form 60 approval rate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtPerformance {
    pub court_id: Uuid,
    pub court_name: String,
    pub count: usize,
    /// Approved share of the station's records, as a percentage
    pub compliance_rate: f64,
}
