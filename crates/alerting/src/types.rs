//! Alert model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::history::HistoryLedger;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// All severities, most urgent first
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Capitalized label used by the dashboard badges
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// Lifecycle stage of an alert.
///
/// Ordered so that a later stage compares greater than an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    New,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::New => "new",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertStatus::New => "New",
            AlertStatus::Acknowledged => "Acknowledged",
            AlertStatus::Resolved => "Resolved",
        }
    }

    /// Whether `next` is a legal forward step from this status
    pub fn can_advance_to(&self, next: AlertStatus) -> bool {
        matches!(
            (self, next),
            (AlertStatus::New, AlertStatus::Acknowledged)
                | (AlertStatus::New, AlertStatus::Resolved)
                | (AlertStatus::Acknowledged, AlertStatus::Resolved)
        )
    }

    pub fn is_terminal(&self) -> bool {
        *self == AlertStatus::Resolved
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(AlertStatus::New),
            "acknowledged" => Ok(AlertStatus::Acknowledged),
            "resolved" => Ok(AlertStatus::Resolved),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Kind of anomaly that raised the alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertCategory {
    /// Oversized particle on the belt
    LargeParticle,
    /// Non-coal object on the belt
    ForeignObject,
    /// Belt, sensor, or drive fault
    System,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::LargeParticle => "large-particle",
            AlertCategory::ForeignObject => "foreign-object",
            AlertCategory::System => "system",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large-particle" => Ok(AlertCategory::LargeParticle),
            "foreign-object" => Ok(AlertCategory::ForeignObject),
            "system" => Ok(AlertCategory::System),
            other => Err(format!("unknown alert category '{}'", other)),
        }
    }
}

/// A detected anomaly on a conveyor.
///
/// Descriptive fields are public. Lifecycle state (status, assignee,
/// history) is only changed through [`crate::AlertStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub conveyor_id: String,
    pub conveyor_name: String,
    pub category: AlertCategory,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    assigned: Option<String>,
    status: AlertStatus,
    #[serde(default)]
    history: HistoryLedger,
}

impl Alert {
    /// Create a new, unassigned alert in `new` status
    pub fn new(
        id: impl Into<String>,
        conveyor_id: impl Into<String>,
        conveyor_name: impl Into<String>,
        category: AlertCategory,
        severity: Severity,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            conveyor_id: conveyor_id.into(),
            conveyor_name: conveyor_name.into(),
            category,
            severity,
            timestamp,
            description: description.into(),
            assigned: None,
            status: AlertStatus::New,
            history: HistoryLedger::new(),
        }
    }

    /// Set the assignee an ingestion source already recorded
    pub fn with_assigned(mut self, user: impl Into<String>) -> Self {
        self.assigned = Some(user.into());
        self
    }

    /// Set the status an ingestion source already recorded
    pub fn with_status(mut self, status: AlertStatus) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> AlertStatus {
        self.status
    }

    pub fn assigned(&self) -> Option<&str> {
        self.assigned.as_deref()
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Not yet resolved
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    pub(crate) fn set_status(&mut self, status: AlertStatus) {
        debug_assert!(self.status.can_advance_to(status));
        self.status = status;
    }

    pub(crate) fn set_assigned(&mut self, user: Option<String>) {
        self.assigned = user;
    }

    pub(crate) fn history_mut(&mut self) -> &mut HistoryLedger {
        &mut self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order_is_forward_only() {
        assert!(AlertStatus::New.can_advance_to(AlertStatus::Acknowledged));
        assert!(AlertStatus::New.can_advance_to(AlertStatus::Resolved));
        assert!(AlertStatus::Acknowledged.can_advance_to(AlertStatus::Resolved));

        assert!(!AlertStatus::Acknowledged.can_advance_to(AlertStatus::New));
        assert!(!AlertStatus::Resolved.can_advance_to(AlertStatus::Acknowledged));
        assert!(!AlertStatus::Resolved.can_advance_to(AlertStatus::Resolved));
        assert!(AlertStatus::New < AlertStatus::Acknowledged);
        assert!(AlertStatus::Acknowledged < AlertStatus::Resolved);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("acknowledged".parse::<AlertStatus>().unwrap(), AlertStatus::Acknowledged);
        assert_eq!(
            "foreign-object".parse::<AlertCategory>().unwrap(),
            AlertCategory::ForeignObject
        );
        assert!("urgent".parse::<Severity>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AlertCategory::LargeParticle).unwrap();
        assert_eq!(json, "\"large-particle\"");
        let json = serde_json::to_string(&AlertStatus::Acknowledged).unwrap();
        assert_eq!(json, "\"acknowledged\"");
    }

    #[test]
    fn test_new_alert_defaults() {
        let alert = Alert::new(
            "a001",
            "c002",
            "Secondary Crusher Feed",
            AlertCategory::LargeParticle,
            Severity::Warning,
            Utc::now(),
            "Large particle (65mm+) detected",
        );
        assert_eq!(alert.status(), AlertStatus::New);
        assert!(alert.assigned().is_none());
        assert!(alert.history().is_empty());
        assert!(alert.is_active());
    }
}
