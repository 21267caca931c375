//! Record service contract and error taxonomy.

use crate::models::{PageData, Query, Record, RecordDraft, RecordId};
use thiserror::Error;

/// Failure of a record service operation.
///
/// Transport covers network errors, timeouts and malformed responses, all
/// caught at the service boundary. Rejected means the server answered with
/// a well-formed envelope whose error flag was truthy; its message, when
/// present, is passed through verbatim.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    Transport(String),
    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected { message: Option<String> },
}

impl ServiceError {
    /// Server message of an application-level rejection, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ServiceError::Transport(_) => None,
            ServiceError::Rejected { message } => message.as_deref(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

/// Uniform per-entity façade over the remote CRUD API.
///
/// Mutating operations yield the server's success message when it sends
/// one; controllers substitute operation-specific defaults otherwise.
pub trait RecordService {
    fn list(&self, query: &Query) -> Result<PageData, ServiceError>;
    fn create(&self, draft: &RecordDraft) -> Result<Option<String>, ServiceError>;
    fn get(&self, id: &RecordId) -> Result<Record, ServiceError>;
    fn update(&self, id: &RecordId, draft: &RecordDraft) -> Result<Option<String>, ServiceError>;
    fn delete(&self, id: &RecordId) -> Result<Option<String>, ServiceError>;
}

/// Transient notification sink the controllers report into.
///
/// Injected rather than global so tests can record what was surfaced; the
/// TUI's toast bin is the production implementation.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Notifier that discards everything.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&mut self, _message: &str) {}
    fn error(&mut self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_falls_back_without_message() {
        let with = ServiceError::Rejected {
            message: Some("locked".into()),
        };
        assert_eq!(with.to_string(), "locked");
        let without = ServiceError::Rejected { message: None };
        assert_eq!(without.to_string(), "request rejected");
    }

    #[test]
    fn transport_has_no_application_message() {
        let err = ServiceError::Transport("connection refused".into());
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "connection refused");
    }
}
