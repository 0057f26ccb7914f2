//! Alerting Error Types

use thiserror::Error;

use crate::types::AlertStatus;

/// Errors raised by refused lifecycle actions.
///
/// A refused action never leaves partial state behind: every check runs
/// before the alert is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    /// No alert with this identifier
    #[error("Alert not found: {0}")]
    AlertNotFound(String),

    /// Acknowledgment submitted without a reason
    #[error("Acknowledgment reason must not be empty")]
    EmptyReason,

    /// Status change not allowed from the current status
    #[error("Cannot {action} alert {id} while it is {from}")]
    InvalidTransition {
        id: String,
        from: AlertStatus,
        action: &'static str,
    },

    /// Assignment target is not on the roster
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Unassign requested but nobody is assigned
    #[error("Alert {0} has no assigned user")]
    NotAssigned(String),

    /// Proof attachment is not an image or video
    #[error("Unsupported proof attachment: {0}")]
    UnsupportedProof(String),

    /// Alert identifier already present in the store
    #[error("Duplicate alert id: {0}")]
    DuplicateAlert(String),

    /// Confirm called without an open acknowledgment dialog
    #[error("No acknowledgment dialog is open")]
    DialogClosed,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for AlertError {
    fn from(err: config::ConfigError) -> Self {
        AlertError::Config(err.to_string())
    }
}
