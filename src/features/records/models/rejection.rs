use std::collections::HashMap;
use std::path::Path;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{DEFAULT_REJECTION_REASONS, OTHER_REJECTION_REASON};
use crate::shared::validation::{comparison_key, normalize_text};

/// Why a submitted rejection reason could not be accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReasonError {
    Missing,
    OtherWithoutText,
    NotInVocabulary(String),
}

impl std::fmt::Display for RejectionReasonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReasonError::Missing => {
                write!(f, "A rejection reason is required for rejected records")
            }
            RejectionReasonError::OtherWithoutText => {
                write!(f, "Rejection reason 'Other' requires free-text details")
            }
            RejectionReasonError::NotInVocabulary(reason) => write!(
                f,
                "'{}' is not a listed rejection reason; choose 'Other' to enter free text",
                reason
            ),
        }
    }
}

/// Controlled list of Form 60 rejection reasons.
///
/// Loaded as configuration data. Lookups are case-insensitive and tolerant of
/// whitespace and apostrophe style, and always resolve to the canonical text.
#[derive(Debug, Clone)]
pub struct RejectionVocabulary {
    reasons: Vec<String>,
    index: HashMap<String, usize>,
}

impl Default for RejectionVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_REJECTION_REASONS.iter().copied())
    }
}

impl RejectionVocabulary {
    pub fn new<I, S>(reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Vec::new();
        let mut index = HashMap::new();

        for reason in reasons {
            let canonical = normalize_text(reason.as_ref());
            if canonical.is_empty() || canonical.eq_ignore_ascii_case(OTHER_REJECTION_REASON) {
                continue;
            }
            let key = comparison_key(&canonical);
            if index.contains_key(&key) {
                continue;
            }
            index.insert(key, list.len());
            list.push(canonical);
        }

        Self {
            reasons: list,
            index,
        }
    }

    /// Parse a JSON array of reason strings
    pub fn from_json(json: &str) -> Result<Self> {
        let reasons: Vec<String> = serde_json::from_str(json).map_err(|e| {
            AppError::Config(format!("Rejection reasons must be a JSON array of strings: {}", e))
        })?;

        let vocabulary = Self::new(reasons);
        if vocabulary.is_empty() {
            return Err(AppError::Config(
                "Rejection reason list must contain at least one reason".to_string(),
            ));
        }
        Ok(vocabulary)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read rejection reasons from {}: {}",
                path.display(),
                e
            ))
        })?;
        let vocabulary = Self::from_json(&json)?;
        tracing::info!(
            "Loaded {} rejection reasons from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Canonical text for a listed reason
    pub fn lookup(&self, reason: &str) -> Option<&str> {
        self.index
            .get(&comparison_key(reason))
            .map(|&i| self.reasons[i].as_str())
    }

    /// Resolve a submitted reason to the text stored on the record.
    ///
    /// `reason` is either a listed reason or `Other`; with `Other`, the
    /// normalised `other_text` is what gets stored.
    pub fn resolve(
        &self,
        reason: Option<&str>,
        other_text: Option<&str>,
    ) -> std::result::Result<String, RejectionReasonError> {
        let reason = reason.map(normalize_text).unwrap_or_default();
        if reason.is_empty() {
            return Err(RejectionReasonError::Missing);
        }

        if reason.eq_ignore_ascii_case(OTHER_REJECTION_REASON) {
            let text = other_text.map(normalize_text).unwrap_or_default();
            if text.is_empty() {
                return Err(RejectionReasonError::OtherWithoutText);
            }
            return Ok(text);
        }

        self.lookup(&reason)
            .map(str::to_string)
            .ok_or(RejectionReasonError::NotInVocabulary(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_has_registry_reasons() {
        let vocabulary = RejectionVocabulary::default();
        assert_eq!(vocabulary.len(), 25);
        assert_eq!(
            vocabulary.lookup("form 60 missing"),
            Some("FORM 60 missing")
        );
    }

    #[test]
    fn test_resolve_listed_reason_returns_canonical_text() {
        let vocabulary = RejectionVocabulary::default();
        let resolved = vocabulary
            .resolve(Some("  receipt mismatch/wrong   receipt "), None)
            .unwrap();
        assert_eq!(resolved, "Receipt mismatch/wrong receipt");
    }

    #[test]
    fn test_resolve_other_requires_free_text() {
        let vocabulary = RejectionVocabulary::default();

        assert_eq!(
            vocabulary.resolve(Some("Other"), Some("  Petitioner ID   illegible ")),
            Ok("Petitioner ID illegible".to_string())
        );
        assert_eq!(
            vocabulary.resolve(Some("other"), Some("   ")),
            Err(RejectionReasonError::OtherWithoutText)
        );
        assert_eq!(
            vocabulary.resolve(None, Some("anything")),
            Err(RejectionReasonError::Missing)
        );
    }

    #[test]
    fn test_resolve_rejects_unlisted_reason() {
        let vocabulary = RejectionVocabulary::default();
        assert!(matches!(
            vocabulary.resolve(Some("Looks wrong"), None),
            Err(RejectionReasonError::NotInVocabulary(_))
        ));
    }

    #[test]
    fn test_from_json_deduplicates_and_skips_other() {
        let vocabulary =
            RejectionVocabulary::from_json(r#"["Altered Form 60 Notice", "altered form 60 notice", "Other", " "]"#)
                .unwrap();
        assert_eq!(vocabulary.reasons(), ["Altered Form 60 Notice".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert!(matches!(
            RejectionVocabulary::from_json(r#"{"reasons": []}"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            RejectionVocabulary::from_json("[]"),
            Err(AppError::Config(_))
        ));
    }
}
