use thiserror::Error;

/// Errors returned by the checked entry points, builders and config loading.
///
/// The totals pipeline itself never fails: malformed numbers are coerced to
/// zero before they reach it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FaturaError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Settings or line items could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Totals arithmetic inconsistency.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

impl FaturaError {
    /// Join a list of validation errors into a single `Validation` error.
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        let msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(msg)
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "lines[0].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Rule identifier if applicable (e.g. "LINE-01").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with a rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_and_without_rule() {
        let e = ValidationError::with_rule("lines[0].quantity", "must not be negative", "LINE-01");
        assert_eq!(e.to_string(), "[LINE-01] lines[0].quantity: must not be negative");

        let e = ValidationError::new("settings", "bad");
        assert_eq!(e.to_string(), "settings: bad");
    }

    #[test]
    fn joined_validation_message() {
        let err = FaturaError::from_validation(&[
            ValidationError::new("a", "one"),
            ValidationError::new("b", "two"),
        ]);
        assert_eq!(err.to_string(), "validation failed: a: one; b: two");
    }
}
