use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single user-correctable problem with a record submission, tagged with
/// the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Flattens `validator` derive output into field-tagged errors, sorted by
/// field so callers get a stable order.
pub fn from_validation_errors(errors: &validator::ValidationErrors) -> Vec<ValidationError> {
    let mut out: Vec<ValidationError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                ValidationError::new(field.to_string(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Field-tagged errors carried by a validation failure, empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(length(min = 1))]
        code: String,
    }

    #[test]
    fn test_from_validation_errors_tags_fields() {
        let probe = Probe {
            name: String::new(),
            code: String::new(),
        };
        let errors = from_validation_errors(&probe.validate().unwrap_err());

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "code");
        assert_eq!(errors[0].message, "length");
        assert_eq!(errors[1], ValidationError::new("name", "Name is required"));
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let err = AppError::Validation(vec![
            ValidationError::new("cause_number", "Cause number is required"),
            ValidationError::new("deceased_name", "Name of deceased is required"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation error: cause_number: Cause number is required; deceased_name: Name of deceased is required"
        );
        assert_eq!(err.validation_errors().len(), 2);
        assert!(AppError::NotFound("x".into()).validation_errors().is_empty());
    }
}
