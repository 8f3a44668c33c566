//! Custom error types for the policy engine
//!
//! The engine itself is total over well-typed input; errors only surface at
//! the boundary (constructors that validate caller input, config files,
//! scenario files and exports).

use thiserror::Error;

/// The main error type for budget-policy operations
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Malformed caller input (bad percentage, threshold out of range, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown named entity
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Scenario file errors
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl PolicyError {
    /// Create a "not found" error for allocation rules
    pub fn rule_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Allocation rule",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for rebalance strategies
    pub fn strategy_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Rebalance strategy",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for asset classes
    pub fn asset_class_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Asset class",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PolicyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for PolicyError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for PolicyError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for budget-policy operations
pub type PolicyResult<T> = Result<T, PolicyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PolicyError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PolicyError::strategy_not_found("yolo");
        assert_eq!(err.to_string(), "Rebalance strategy not found: yolo");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_error() {
        let err = PolicyError::Validation("threshold must be between 1 and 15".into());
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: threshold must be between 1 and 15"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let policy_err: PolicyError = io_err.into();
        assert!(matches!(policy_err, PolicyError::Io(_)));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let policy_err: PolicyError = yaml_err.into();
        assert!(matches!(policy_err, PolicyError::Yaml(_)));
    }
}
