use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use probate_registry_core::core::config::Config;
use probate_registry_core::core::database;
use probate_registry_core::features::records::dtos::{
    CourtPerformance, RecordFilter, RecordStats, RecordSummary,
};
use probate_registry_core::features::records::services::RecordBands;
use probate_registry_core::features::records::{
    ComplianceThresholds, InMemoryRecordStore, PgRecordStore, ProbateRecord, RecordService,
    RecordStore, RejectionVocabulary,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Compliance report printed to stdout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComplianceReport {
    generated_at: DateTime<Utc>,
    kpi_breach_days: i64,
    summary: RecordSummary,
    stats: RecordStats,
    court_performance: Vec<CourtPerformance>,
    kpi_escalations: Vec<ProbateRecord>,
    lead_time_bands: Vec<RecordBands>,
}

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let vocabulary = match &config.compliance.rejection_reasons_file {
        Some(path) => RejectionVocabulary::from_file(path)?,
        None => RejectionVocabulary::default(),
    };

    let store: Arc<dyn RecordStore> = match &config.database {
        Some(db_config) => {
            let pool = database::create_pool(db_config).await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            database::run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Arc::new(PgRecordStore::new(pool))
        }
        None => {
            let records = match &config.app.records_file {
                Some(path) => load_records(path)?,
                None => Vec::new(),
            };
            tracing::info!("Using in-memory store with {} records", records.len());
            Arc::new(InMemoryRecordStore::with_records(records))
        }
    };

    let thresholds = ComplianceThresholds::from(&config.compliance);
    let service = RecordService::new(store, Arc::new(vocabulary), thresholds);

    let all = RecordFilter::default();
    let report = ComplianceReport {
        generated_at: Utc::now(),
        kpi_breach_days: thresholds.kpi_breach_days,
        summary: service.summary(&all).await?,
        stats: service.stats().await?,
        court_performance: service.court_performance(&all).await?,
        kpi_escalations: service.kpi_escalations().await?,
        lead_time_bands: service.lead_time_bands(&all).await?,
    };

    if !report.kpi_escalations.is_empty() {
        tracing::warn!(
            "{} records breach the {}-day KPI and have not been escalated",
            report.kpi_escalations.len(),
            thresholds.kpi_breach_days
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Seed records from a JSON export; lead times are recomputed from the dates
fn load_records(path: &Path) -> anyhow::Result<Vec<ProbateRecord>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let mut records: Vec<ProbateRecord> = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid records file {}: {}", path.display(), e))?;

    for record in &mut records {
        record.refresh_lead_times();
        if let Err(errors) = record.check_invariants() {
            for error in errors {
                tracing::warn!("Record {} is inconsistent: {}", record.id, error);
            }
        }
    }

    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
