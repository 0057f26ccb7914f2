//! Alert counts for header cards and severity charts

use serde::Serialize;

use crate::types::{Alert, Severity};

/// Alert counts; "active" means not resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub total: usize,
    pub active: usize,
    pub critical_active: usize,
    pub warning_active: usize,
    pub info_active: usize,
    pub unassigned_active: usize,
}

impl AlertSummary {
    pub fn from_alerts<'a, I>(alerts: I) -> Self
    where
        I: IntoIterator<Item = &'a Alert>,
    {
        let mut summary = Self::default();
        for alert in alerts {
            summary.total += 1;
            if !alert.is_active() {
                continue;
            }
            summary.active += 1;
            match alert.severity {
                Severity::Critical => summary.critical_active += 1,
                Severity::Warning => summary.warning_active += 1,
                Severity::Info => summary.info_active += 1,
            }
            if alert.assigned().is_none() {
                summary.unassigned_active += 1;
            }
        }
        summary
    }

    /// Active alerts per severity, most urgent first
    pub fn severity_distribution(&self) -> [(Severity, usize); 3] {
        [
            (Severity::Critical, self.critical_active),
            (Severity::Warning, self.warning_active),
            (Severity::Info, self.info_active),
        ]
    }
}
