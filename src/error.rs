use thiserror::Error;

/// Unified error type for pkg-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid version specifier: {0}")]
    InvalidVersionSpecifier(String),

    #[error("External operation '{operation}' failed: {detail}")]
    ExternalOperation { operation: String, detail: String },

    #[error("Registry query failed: {0}")]
    RegistryQuery(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Staging error: {0}")]
    Staging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pkg-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an invalid-specifier error with context
    pub fn invalid_specifier(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidVersionSpecifier(msg.into())
    }

    /// Create an external operation error for the named operation
    pub fn external(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        ReleaseError::ExternalOperation {
            operation: operation.into(),
            detail: detail.into(),
        }
    }

    /// Create a registry query error with context
    pub fn registry_query(msg: impl Into<String>) -> Self {
        ReleaseError::RegistryQuery(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a staging error with context
    pub fn staging(msg: impl Into<String>) -> Self {
        ReleaseError::Staging(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_external_error_names_operation() {
        let err = ReleaseError::external("npm publish", "exit status 1");
        assert_eq!(
            err.to_string(),
            "External operation 'npm publish' failed: exit status 1"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (
                ReleaseError::invalid_specifier("x"),
                "Invalid version specifier",
            ),
            (ReleaseError::registry_query("x"), "Registry query failed"),
            (ReleaseError::version("x"), "Version parsing error"),
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::staging("x"), "Staging error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_empty_messages() {
        let errors = vec![
            ReleaseError::config(""),
            ReleaseError::version(""),
            ReleaseError::staging(""),
        ];

        for err in errors {
            // Even with empty message, the error type prefix should be present
            assert!(!err.to_string().is_empty());
        }
    }
}
