use std::collections::HashMap;

use uuid::Uuid;

use crate::features::records::dtos::{
    ComplianceCounts, CourtPerformance, GpStatusCounts, LeadTimeAverages, RecordStats,
};
use crate::features::records::models::{ComplianceVerdict, GpPublicationStatus, ProbateRecord};
use crate::features::records::services::lead_time::{average, ComplianceThresholds};

/// Dashboard statistics over a set of records
pub fn record_stats(records: &[ProbateRecord], thresholds: &ComplianceThresholds) -> RecordStats {
    let mut stats = RecordStats {
        total: records.len(),
        ..RecordStats::default()
    };

    let mut compliance = ComplianceCounts::default();
    let mut gp_status = GpStatusCounts::default();
    for record in records {
        match record.compliance_verdict {
            ComplianceVerdict::Approved => compliance.approved += 1,
            ComplianceVerdict::Rejected => compliance.rejected += 1,
        }
        match record.gp_publication_status {
            GpPublicationStatus::Pending => gp_status.pending += 1,
            GpPublicationStatus::Published => gp_status.published += 1,
        }
        if thresholds.record_in_breach(record) {
            stats.kpi_breaches += 1;
        }
    }

    stats.compliance = compliance;
    stats.gp_status = gp_status;
    stats.averages = LeadTimeAverages {
        receiving_lead_time: average(records.iter().filter_map(|r| r.receiving_lead_time_days)),
        forwarding_lead_time: average(records.iter().filter_map(|r| r.forwarding_lead_time_days)),
    };
    stats
}

/// Volume and approval rate per court station, busiest first
pub fn court_performance(records: &[ProbateRecord]) -> Vec<CourtPerformance> {
    // court id -> (name, total, approved)
    let mut by_court: HashMap<Uuid, (String, usize, usize)> = HashMap::new();

    for record in records {
        let entry = by_court
            .entry(record.court_station.id)
            .or_insert_with(|| (record.court_station.name.clone(), 0, 0));
        entry.1 += 1;
        if record.compliance_verdict == ComplianceVerdict::Approved {
            entry.2 += 1;
        }
    }

    let mut performance: Vec<CourtPerformance> = by_court
        .into_iter()
        .map(|(court_id, (court_name, count, approved))| CourtPerformance {
            court_id,
            court_name,
            count,
            compliance_rate: approved as f64 / count as f64 * 100.0,
        })
        .collect();

    performance.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.court_name.cmp(&b.court_name))
    });
    performance
}

/// Breached records whose escalation has not gone out yet, oldest entry first
pub fn kpi_escalations(
    records: &[ProbateRecord],
    thresholds: &ComplianceThresholds,
) -> Vec<ProbateRecord> {
    let mut pending: Vec<ProbateRecord> = records
        .iter()
        .filter(|r| !r.kpi_alert_sent && thresholds.record_in_breach(r))
        .cloned()
        .collect();
    pending.sort_by_key(|r| r.sequence_number);
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{court, date, forwarded_record, rejected_record};

    #[test]
    fn test_record_stats_counts_and_averages() {
        let received = date(2024, 1, 1);
        let mut published = forwarded_record(received, date(2024, 1, 5));
        published.gp_publication_status = GpPublicationStatus::Published;
        let mut late = forwarded_record(received, date(2024, 2, 14));
        late.date_of_receipt = Some(date(2024, 1, 3));
        late.refresh_lead_times();
        let rejected = rejected_record(received, "FORM 60 missing");

        let stats = record_stats(
            &[published, late, rejected],
            &ComplianceThresholds::default(),
        );

        assert_eq!(stats.total, 3);
        assert_eq!(stats.compliance.approved, 2);
        assert_eq!(stats.compliance.rejected, 1);
        assert_eq!(stats.gp_status.published, 1);
        assert_eq!(stats.gp_status.pending, 2);
        assert_eq!(stats.kpi_breaches, 1);
        assert_eq!(stats.averages.receiving_lead_time, Some(2.0));
        assert_eq!(stats.averages.forwarding_lead_time, Some(24.0));
    }

    #[test]
    fn test_record_stats_empty_has_no_averages() {
        let stats = record_stats(&[], &ComplianceThresholds::default());
        assert_eq!(stats, RecordStats::default());
        assert_eq!(stats.averages.forwarding_lead_time, None);
    }

    #[test]
    fn test_court_performance_rates_and_order() {
        let received = date(2024, 1, 1);
        let nairobi = court("Nairobi Milimani");
        let mombasa = court("Mombasa Law Courts");

        let mut records = Vec::new();
        for verdict_rejected in [false, false, false, true] {
            let mut r = if verdict_rejected {
                rejected_record(received, "FORM 60 missing")
            } else {
                forwarded_record(received, date(2024, 1, 2))
            };
            r.court_station = nairobi.clone();
            records.push(r);
        }
        let mut m = rejected_record(received, "FORM 60 missing");
        m.court_station = mombasa.clone();
        records.push(m);

        let performance = court_performance(&records);
        assert_eq!(performance.len(), 2);
        assert_eq!(performance[0].court_id, nairobi.id);
        assert_eq!(performance[0].count, 4);
        assert_eq!(performance[0].compliance_rate, 75.0);
        assert_eq!(performance[1].court_name, "Mombasa Law Courts");
        assert_eq!(performance[1].compliance_rate, 0.0);
    }

    #[test]
    fn test_kpi_escalations_skip_already_alerted() {
        let received = date(2024, 1, 1);
        let mut first = forwarded_record(received, date(2024, 3, 1));
        first.sequence_number = 2;
        let mut alerted = forwarded_record(received, date(2024, 3, 1));
        alerted.kpi_alert_sent = true;
        let mut second = forwarded_record(received, date(2024, 2, 15));
        second.sequence_number = 1;
        let on_time = forwarded_record(received, date(2024, 1, 31));

        let pending = kpi_escalations(
            &[first.clone(), alerted, second.clone(), on_time],
            &ComplianceThresholds::default(),
        );
        let ids: Vec<Uuid> = pending.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
