use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

/// Court level enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "court_level", rename_all = "snake_case")]
pub enum CourtLevel {
    #[serde(rename = "High Court")]
    HighCourt,
    #[serde(rename = "Law Courts")]
    LawCourts,
    #[serde(rename = "Kadhi Court")]
    KadhiCourt,
    #[serde(rename = "Children's Court", alias = "Children\u{2019}s Court")]
    ChildrensCourt,
    #[serde(rename = "Sub-Registry")]
    SubRegistry,
    #[serde(rename = "Other")]
    Other,
}

impl std::fmt::Display for CourtLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourtLevel::HighCourt => write!(f, "High Court"),
            CourtLevel::LawCourts => write!(f, "Law Courts"),
            CourtLevel::KadhiCourt => write!(f, "Kadhi Court"),
            CourtLevel::ChildrensCourt => write!(f, "Children's Court"),
            CourtLevel::SubRegistry => write!(f, "Sub-Registry"),
            CourtLevel::Other => write!(f, "Other"),
        }
    }
}

/// Court station a probate matter originates from.
///
/// Reference data owned by the courts registry; records only ever point at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtStation {
    pub id: Uuid,
    pub name: String,
    pub level: CourtLevel,
}

impl CourtStation {
    pub fn new(id: Uuid, name: impl Into<String>, level: CourtLevel) -> Self {
        Self {
            id,
            name: name.into(),
            level,
        }
    }
}
