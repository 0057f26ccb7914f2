//! Per-alert history ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of lifecycle action recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Assignment,
    Unassignment,
    Acknowledgment,
    Resolution,
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HistoryKind::Assignment => "assignment",
            HistoryKind::Unassignment => "unassignment",
            HistoryKind::Acknowledgment => "acknowledgment",
            HistoryKind::Resolution => "resolution",
        };
        f.write_str(name)
    }
}

/// One immutable lifecycle record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub kind: HistoryKind,
    /// Acting or target user
    pub user: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Name of the proof file; the content is never kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_file: Option<String>,
}

impl HistoryEntry {
    pub(crate) fn new(
        kind: HistoryKind,
        user: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            user: user.into(),
            timestamp,
            reason: None,
            proof_file: None,
        }
    }

    pub(crate) fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub(crate) fn with_proof_file(mut self, proof_file: Option<String>) -> Self {
        self.proof_file = proof_file;
        self
    }

    /// Timeline caption, e.g. "Acknowledged by Sachi Gupta"
    pub fn describe(&self) -> String {
        match self.kind {
            HistoryKind::Assignment => format!("Assigned to {}", self.user),
            HistoryKind::Unassignment => format!("Unassigned from {}", self.user),
            HistoryKind::Acknowledgment => format!("Acknowledged by {}", self.user),
            HistoryKind::Resolution => format!("Resolved by {}", self.user),
        }
    }
}

/// Append-only, insertion-ordered sequence of history entries.
///
/// No retention policy: the ledger grows for the life of the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push(entry);
        self.entries.last().expect("entry was just pushed")
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries sorted oldest first; ties keep insertion order
    pub fn chronological(&self) -> Vec<&HistoryEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.timestamp);
        sorted
    }

    /// Entries sorted newest first; ties show the later insertion first
    pub fn newest_first(&self) -> Vec<&HistoryEntry> {
        let mut sorted = self.chronological();
        sorted.reverse();
        sorted
    }

    /// Most recently appended entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 30, 8, minute, 0).unwrap()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut ledger = HistoryLedger::new();
        ledger.append(HistoryEntry::new(HistoryKind::Assignment, "Kartik More", at(5)));
        ledger.append(HistoryEntry::new(HistoryKind::Resolution, "Kartik More", at(1)));

        let kinds: Vec<_> = ledger.entries().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![HistoryKind::Assignment, HistoryKind::Resolution]);
        assert_eq!(ledger.latest().unwrap().kind, HistoryKind::Resolution);
    }

    #[test]
    fn test_append_returns_stored_entry() {
        let mut ledger = HistoryLedger::new();
        ledger.append(HistoryEntry::new(HistoryKind::Assignment, "Kartik More", at(1)));
        let entry = HistoryEntry::new(HistoryKind::Acknowledgment, "Kartik More", at(2))
            .with_reason("Cleared jam");
        let id = ledger.append(entry).id;

        assert_eq!(ledger.len(), 2);
        let latest = ledger.latest().unwrap();
        assert_eq!(latest.id, id);
        assert_eq!(latest.reason.as_deref(), Some("Cleared jam"));
    }

    #[test]
    fn test_display_orders() {
        let mut ledger = HistoryLedger::new();
        ledger.append(HistoryEntry::new(HistoryKind::Assignment, "A", at(10)));
        ledger.append(HistoryEntry::new(HistoryKind::Acknowledgment, "A", at(0)));
        ledger.append(HistoryEntry::new(
            HistoryKind::Resolution,
            "A",
            at(10) + Duration::minutes(5),
        ));

        let oldest: Vec<_> = ledger.chronological().iter().map(|e| e.kind).collect();
        assert_eq!(
            oldest,
            vec![HistoryKind::Acknowledgment, HistoryKind::Assignment, HistoryKind::Resolution]
        );

        let newest: Vec<_> = ledger.newest_first().iter().map(|e| e.kind).collect();
        assert_eq!(
            newest,
            vec![HistoryKind::Resolution, HistoryKind::Assignment, HistoryKind::Acknowledgment]
        );
        // Display order never touches the stored order
        assert_eq!(ledger.entries()[0].kind, HistoryKind::Assignment);
    }

    #[test]
    fn test_describe() {
        let entry = HistoryEntry::new(HistoryKind::Unassignment, "Sachi Gupta", at(0));
        assert_eq!(entry.describe(), "Unassigned from Sachi Gupta");
        let entry = HistoryEntry::new(HistoryKind::Resolution, "Unknown user", at(0));
        assert_eq!(entry.describe(), "Resolved by Unknown user");
    }

    #[test]
    fn test_serialize_skips_empty_optionals() {
        let entry = HistoryEntry::new(HistoryKind::Assignment, "Hritik Sawant", at(0));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "assignment");
        assert!(json.get("reason").is_none());
        assert!(json.get("proof_file").is_none());
    }
}
