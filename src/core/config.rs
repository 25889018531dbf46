use std::env;
use std::path::PathBuf;

use crate::shared::constants::{
    FORWARDING_DISPLAY_TARGET_DAYS, KPI_BREACH_THRESHOLD_DAYS, RECEIVING_DISPLAY_TARGET_DAYS,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub compliance: ComplianceConfig,
    /// Present only when `DATABASE_URL` is set; otherwise the in-memory store is used
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON file of records used to seed the in-memory store
    pub records_file: Option<PathBuf>,
}

/// Lead-time thresholds and the rejection vocabulary source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceConfig {
    /// Lead times strictly above this many days are KPI breaches
    pub kpi_breach_days: i64,
    /// Display-only colour target for receiving lead time
    pub receiving_target_days: i64,
    /// Display-only colour target for forwarding lead time
    pub forwarding_target_days: i64,
    /// JSON array of canonical rejection reasons; built-in list when unset
    pub rejection_reasons_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            compliance: ComplianceConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let records_file = env::var("RECORDS_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { records_file })
    }
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            kpi_breach_days: KPI_BREACH_THRESHOLD_DAYS,
            receiving_target_days: RECEIVING_DISPLAY_TARGET_DAYS,
            forwarding_target_days: FORWARDING_DISPLAY_TARGET_DAYS,
            rejection_reasons_file: None,
        }
    }
}

impl ComplianceConfig {
    pub fn from_env() -> Result<Self, String> {
        let kpi_breach_days = parse_days("KPI_BREACH_DAYS", KPI_BREACH_THRESHOLD_DAYS)?;
        let receiving_target_days =
            parse_days("RECEIVING_TARGET_DAYS", RECEIVING_DISPLAY_TARGET_DAYS)?;
        let forwarding_target_days =
            parse_days("FORWARDING_TARGET_DAYS", FORWARDING_DISPLAY_TARGET_DAYS)?;

        let rejection_reasons_file = env::var("REJECTION_REASONS_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            kpi_breach_days,
            receiving_target_days,
            forwarding_target_days,
            rejection_reasons_file,
        })
    }
}

fn parse_days(key: &str, default: i64) -> Result<i64, String> {
    let days = env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<i64>()
        .map_err(|_| format!("{} must be a valid number of days", key))?;

    if days < 0 {
        return Err(format!("{} must not be negative", key));
    }
    Ok(days)
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Option<Self>, String> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => return Ok(None),
        };

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Some(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        }))
    }
}
