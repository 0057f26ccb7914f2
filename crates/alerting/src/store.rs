//! Alert Store Implementation

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::acknowledgment::Acknowledgment;
use crate::clock::{Clock, SystemClock};
use crate::error::AlertError;
use crate::filter::AlertFilter;
use crate::history::{HistoryEntry, HistoryKind, HistoryLedger};
use crate::roster::UserRoster;
use crate::settings::AlertingConfig;
use crate::summary::AlertSummary;
use crate::types::{Alert, AlertStatus};

/// In-memory alert collection owned by one session.
///
/// All lifecycle changes go through `assign`, `unassign`, `acknowledge`
/// and `resolve`. Each successful call appends exactly one history entry;
/// each refused call leaves the store untouched.
pub struct AlertStore {
    /// Configuration
    config: AlertingConfig,
    /// Assignable users
    roster: UserRoster,
    /// Alerts in ingestion order
    alerts: Vec<Alert>,
    /// Alert id to position in `alerts`
    index: HashMap<String, usize>,
    /// Timestamp source for history entries
    clock: Box<dyn Clock>,
}

impl AlertStore {
    /// Create an empty store
    pub fn new(config: AlertingConfig) -> Self {
        info!("Creating alert store with config: {:?}", config);
        Self {
            roster: UserRoster::new(config.known_users.iter().cloned()),
            config,
            alerts: Vec::new(),
            index: HashMap::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// Create a store seeded from an ingestion source
    pub fn with_alerts<I>(config: AlertingConfig, alerts: I) -> Result<Self, AlertError>
    where
        I: IntoIterator<Item = Alert>,
    {
        let mut store = Self::new(config);
        for alert in alerts {
            store.insert(alert)?;
        }
        Ok(store)
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Ingest an alert. Ids must be unique.
    pub fn insert(&mut self, alert: Alert) -> Result<(), AlertError> {
        if self.index.contains_key(&alert.id) {
            warn!("Rejected duplicate alert {}", alert.id);
            return Err(AlertError::DuplicateAlert(alert.id));
        }
        debug!("Ingested alert {} ({}, {})", alert.id, alert.severity, alert.status());
        self.index.insert(alert.id.clone(), self.alerts.len());
        self.alerts.push(alert);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.index.get(id).map(|&i| &self.alerts[i])
    }

    /// All alerts in ingestion order
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn config(&self) -> &AlertingConfig {
        &self.config
    }

    pub fn roster(&self) -> &UserRoster {
        &self.roster
    }

    /// Assign a user. Re-assigning the current assignee still records a
    /// new assignment entry.
    pub fn assign(&mut self, id: &str, user: &str) -> Result<&HistoryEntry, AlertError> {
        let user = self.validate_user(user)?;
        let now = self.clock.now();
        let alert = self.alert_mut(id)?;

        alert.set_assigned(Some(user.clone()));
        info!("Alert {} assigned to {}", id, user);
        Ok(alert
            .history_mut()
            .append(HistoryEntry::new(HistoryKind::Assignment, user, now)))
    }

    /// Clear the assignee. The entry records who was unassigned.
    pub fn unassign(&mut self, id: &str) -> Result<&HistoryEntry, AlertError> {
        let now = self.clock.now();
        let alert = self.alert_mut(id)?;

        let previous = match alert.assigned() {
            Some(user) => user.to_string(),
            None => {
                debug!("Unassign ignored: alert {} has no assignee", id);
                return Err(AlertError::NotAssigned(id.to_string()));
            }
        };

        alert.set_assigned(None);
        info!("Alert {} unassigned from {}", id, previous);
        Ok(alert
            .history_mut()
            .append(HistoryEntry::new(HistoryKind::Unassignment, previous, now)))
    }

    /// Move a `new` alert to `acknowledged`
    pub fn acknowledge(
        &mut self,
        id: &str,
        acknowledgment: Acknowledgment,
    ) -> Result<&HistoryEntry, AlertError> {
        let now = self.clock.now();
        let actor = self.actor_for(id)?;
        let alert = self.alert_mut(id)?;
        Self::check_transition(alert, AlertStatus::Acknowledged, "acknowledge")?;

        let (reason, proof_file) = acknowledgment.into_parts();
        alert.set_status(AlertStatus::Acknowledged);
        info!(
            "Alert {} acknowledged by {} (proof: {})",
            id,
            actor,
            proof_file.as_deref().unwrap_or("none")
        );

        let entry = HistoryEntry::new(HistoryKind::Acknowledgment, actor, now)
            .with_reason(reason)
            .with_proof_file(proof_file);
        Ok(alert.history_mut().append(entry))
    }

    /// Move a `new` or `acknowledged` alert to `resolved`
    pub fn resolve(&mut self, id: &str) -> Result<&HistoryEntry, AlertError> {
        let now = self.clock.now();
        let actor = self.actor_for(id)?;
        let alert = self.alert_mut(id)?;
        Self::check_transition(alert, AlertStatus::Resolved, "resolve")?;

        alert.set_status(AlertStatus::Resolved);
        info!("Alert {} resolved by {}", id, actor);
        Ok(alert
            .history_mut()
            .append(HistoryEntry::new(HistoryKind::Resolution, actor, now)))
    }

    /// History ledger for an alert
    pub fn history(&self, id: &str) -> Option<&HistoryLedger> {
        self.get(id).map(Alert::history)
    }

    /// Alerts matching the filter, in ingestion order
    pub fn filter(&self, filter: &AlertFilter) -> Vec<&Alert> {
        filter.apply(&self.alerts)
    }

    /// Alerts that are not resolved
    pub fn active(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.is_active())
    }

    pub fn for_conveyor<'a>(&'a self, conveyor_id: &'a str) -> impl Iterator<Item = &'a Alert> {
        self.alerts.iter().filter(move |a| a.conveyor_id == conveyor_id)
    }

    pub fn summary(&self) -> AlertSummary {
        AlertSummary::from_alerts(&self.alerts)
    }

    fn alert_mut(&mut self, id: &str) -> Result<&mut Alert, AlertError> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.alerts[i]),
            None => {
                debug!("Action ignored: alert {} not found", id);
                Err(AlertError::AlertNotFound(id.to_string()))
            }
        }
    }

    /// Assigned user, or the placeholder label
    fn actor_for(&self, id: &str) -> Result<String, AlertError> {
        let alert = self
            .get(id)
            .ok_or_else(|| AlertError::AlertNotFound(id.to_string()))?;
        Ok(alert
            .assigned()
            .unwrap_or(self.config.unknown_user_label.as_str())
            .to_string())
    }

    fn validate_user(&self, user: &str) -> Result<String, AlertError> {
        let trimmed = user.trim();
        if trimmed.is_empty() {
            return Err(AlertError::UnknownUser(user.to_string()));
        }
        if !self.config.enforce_roster {
            return Ok(trimmed.to_string());
        }
        match self.roster.resolve(trimmed) {
            Some(name) => Ok(name.to_string()),
            None => {
                warn!("Assignment refused: {} is not on the roster", trimmed);
                Err(AlertError::UnknownUser(trimmed.to_string()))
            }
        }
    }

    fn check_transition(
        alert: &Alert,
        next: AlertStatus,
        action: &'static str,
    ) -> Result<(), AlertError> {
        if alert.status().can_advance_to(next) {
            Ok(())
        } else {
            debug!("Cannot {} alert {} from {}", action, alert.id, alert.status());
            Err(AlertError::InvalidTransition {
                id: alert.id.clone(),
                from: alert.status(),
                action,
            })
        }
    }
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new(AlertingConfig::default())
    }
}
