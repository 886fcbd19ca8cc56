use thiserror::Error;

/// Pivot-specific error types
#[derive(Debug, Error)]
pub enum PivotError {
    #[error("Could not locate {capability}: {reason}")]
    Discovery { capability: String, reason: String },

    #[error("Could not register synchronization: {reason}")]
    SynchronizationRegistration {
        reason: String,
        #[source]
        source: Option<Box<PivotError>>,
    },

    #[error("Directory lookup of '{name}' failed: {reason}")]
    DirectoryLookup { name: String, reason: String },

    #[error("Status query failed: {0}")]
    Status(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PivotError {
    pub fn discovery<C: Into<String>, S: Into<String>>(capability: C, reason: S) -> Self {
        PivotError::Discovery {
            capability: capability.into(),
            reason: reason.into(),
        }
    }

    pub fn registration<S: Into<String>>(reason: S) -> Self {
        PivotError::SynchronizationRegistration {
            reason: reason.into(),
            source: None,
        }
    }

    /// Registration failure wrapping the error raised by the step that failed.
    pub fn registration_caused<S: Into<String>>(reason: S, cause: PivotError) -> Self {
        PivotError::SynchronizationRegistration {
            reason: reason.into(),
            source: Some(Box::new(cause)),
        }
    }

    pub fn directory_lookup<N: Into<String>, S: Into<String>>(name: N, reason: S) -> Self {
        PivotError::DirectoryLookup {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn status<S: Into<String>>(msg: S) -> Self {
        PivotError::Status(msg.into())
    }

    pub fn transaction<S: Into<String>>(msg: S) -> Self {
        PivotError::Transaction(msg.into())
    }

    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        PivotError::Configuration(msg.into())
    }
}

/// Result type for pivot operations
pub type PivotResult<T> = Result<T, PivotError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_discovery_error() {
        let error = PivotError::discovery("coordinator", "name not bound");
        assert!(matches!(error, PivotError::Discovery { .. }));
        assert_eq!(
            error.to_string(),
            "Could not locate coordinator: name not bound"
        );
    }

    #[test]
    fn test_registration_error_carries_cause() {
        let cause = PivotError::transaction("connection reset");
        let error = PivotError::registration_caused("could not access current transaction", cause);

        assert!(matches!(
            error,
            PivotError::SynchronizationRegistration { .. }
        ));
        let source = error.source().expect("cause should be preserved");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn test_registration_error_without_cause() {
        let error = PivotError::registration("no transaction is currently active");
        assert!(error.source().is_none());
        assert!(error.to_string().contains("no transaction is currently active"));
    }

    #[test]
    fn test_configuration_error() {
        let error = PivotError::configuration("unknown environment 'clustered'");
        assert_eq!(
            error.to_string(),
            "Configuration error: unknown environment 'clustered'"
        );
    }
}
