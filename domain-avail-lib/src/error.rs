//! Error handling for availability checking collaborators.
//!
//! These errors describe WHOIS lookup failures. They never cross the
//! resolver boundary: the resolver folds every failure into the verdict's
//! `whois_result` field, so callers of `check_one`/`check_many` never see
//! a raised error.

use std::fmt;

/// Error type for collaborator failures during an availability check.
#[derive(Debug, Clone)]
pub enum DomainCheckError {
    /// WHOIS lookup failures (command execution, unparseable response)
    WhoisError { domain: String, message: String },

    /// Timeout errors when a collaborator call takes too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },
}

impl DomainCheckError {
    /// Create a new WHOIS error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::WhoisError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }
}

impl fmt::Display for DomainCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WhoisError { domain, message } => {
                write!(f, "WHOIS error for '{}': {}", domain, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
        }
    }
}

impl std::error::Error for DomainCheckError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn error_display() {
        let err = DomainCheckError::whois("example.com", "command not found");
        assert_eq!(
            err.to_string(),
            "WHOIS error for 'example.com': command not found"
        );

        let err = DomainCheckError::timeout("WHOIS query", Duration::from_secs(5));
        assert!(err.to_string().contains("WHOIS query"));
        assert!(err.to_string().contains("Timeout"));
    }
}
