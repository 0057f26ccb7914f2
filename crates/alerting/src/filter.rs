//! Alert list filtering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{Alert, AlertStatus, Severity};

/// Severity predicate: `all` or one severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    pub fn matches(&self, severity: Severity) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(s) => *s == severity,
        }
    }
}

impl FromStr for SeverityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(SeverityFilter::All)
        } else {
            s.parse().map(SeverityFilter::Only)
        }
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityFilter::All => f.write_str("all"),
            SeverityFilter::Only(s) => write!(f, "{}", s),
        }
    }
}

/// Status predicate: `all` or one status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AlertStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: AlertStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(s) => write!(f, "{}", s),
        }
    }
}

/// Severity AND status predicate with an optional display limit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFilter {
    pub severity: SeverityFilter,
    pub status: StatusFilter,
    pub limit: Option<usize>,
}

impl AlertFilter {
    pub fn new(severity: SeverityFilter, status: StatusFilter) -> Self {
        Self {
            severity,
            status,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        self.severity.matches(alert.severity) && self.status.matches(alert.status())
    }

    /// Matching alerts in their original relative order, truncated to
    /// the limit. Never reorders or mutates.
    pub fn apply<'a, I>(&self, alerts: I) -> Vec<&'a Alert>
    where
        I: IntoIterator<Item = &'a Alert>,
    {
        alerts
            .into_iter()
            .filter(|a| self.matches(a))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}
