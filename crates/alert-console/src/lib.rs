//! Conveyor Alert Console
//!
//! Line-oriented view over the alert store. The console only parses
//! input, gates actions the way the dashboard does, and renders; every
//! lifecycle rule lives in the `alerting` crate.

use std::io::{BufRead, Write};
use std::path::Path;

use alerting::{
    AcknowledgmentDialog, AlertError, AlertStatus, AlertStore, AlertingConfig, ProofAttachment,
};
use conveyor_data::{sample_alerts, PlantRegistry};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod command;
pub mod render;

pub use command::{parse, Command, CommandError, HELP};

/// Selects JSON log output when set to `json`
pub const LOG_FORMAT_ENV: &str = "CONVEYOR_LOG_FORMAT";

/// Console errors
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Alerting error: {0}")]
    Alert(#[from] AlertError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Whether the session continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Exported session state
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    alerts: &'a [alerting::Alert],
    summary: alerting::AlertSummary,
}

/// One console session over an owned store
pub struct Console {
    store: AlertStore,
    registry: PlantRegistry,
    dialog: AcknowledgmentDialog,
}

impl Console {
    pub fn new(store: AlertStore, registry: PlantRegistry) -> Self {
        Self {
            store,
            registry,
            dialog: AcknowledgmentDialog::new(),
        }
    }

    /// Session over the sample plant, with config from `path` and env
    pub fn sample(config_path: Option<&Path>) -> Result<Self, ConsoleError> {
        let config = AlertingConfig::load(config_path)?;
        let store = AlertStore::with_alerts(config, sample_alerts())?;
        Ok(Self::new(store, PlantRegistry::sample()))
    }

    pub fn store(&self) -> &AlertStore {
        &self.store
    }

    pub fn dialog(&self) -> &AcknowledgmentDialog {
        &self.dialog
    }

    /// Read commands until EOF or `quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<(), ConsoleError> {
        info!("Console session started with {} alerts", self.store.len());

        for line in input.lines() {
            let line = line?;
            let command = match parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };

            if self.execute(command, &mut out)? == Flow::Quit {
                break;
            }
            out.flush()?;
        }

        info!("Console session ended");
        Ok(())
    }

    /// Apply one command, writing its view to `out`.
    /// Refused actions print a notice and leave the store unchanged.
    pub fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Flow, ConsoleError> {
        debug!("Executing {:?}", command);
        match command {
            Command::List(mut filter) => {
                if filter.limit.is_none() {
                    filter.limit = self.store.config().default_list_limit;
                }
                let alerts = self.store.filter(&filter);
                writeln!(out, "{}", render::alert_table(&alerts, self.store.len()))?;
            }
            Command::Show(id) => match self.store.get(&id) {
                Some(alert) => writeln!(out, "{}", render::alert_detail(alert))?,
                None => writeln!(out, "{}", AlertError::AlertNotFound(id))?,
            },
            Command::Assign { id, user } => match self.store.assign(&id, &user) {
                Ok(entry) => writeln!(out, "{}: {}", id, entry.describe())?,
                Err(e) => refused(out, &e)?,
            },
            Command::Unassign(id) => match self.store.unassign(&id) {
                Ok(entry) => writeln!(out, "{}: {}", id, entry.describe())?,
                Err(e) => refused(out, &e)?,
            },
            Command::Ack(id) => self.open_dialog(&id, out)?,
            Command::Reason(reason) => {
                if !self.dialog.is_open() {
                    refused(out, &AlertError::DialogClosed)?;
                } else {
                    self.dialog.set_reason(reason);
                    self.show_dialog(out)?;
                }
            }
            Command::Proof(file) => {
                if !self.dialog.is_open() {
                    refused(out, &AlertError::DialogClosed)?;
                } else {
                    match file.map(ProofAttachment::from_file_name).transpose() {
                        Ok(Some(proof)) => self.dialog.attach_proof(proof),
                        Ok(None) => self.dialog.clear_proof(),
                        Err(e) => refused(out, &e)?,
                    }
                    self.show_dialog(out)?;
                }
            }
            Command::Confirm => {
                let id = self.dialog.alert_id().unwrap_or_default().to_string();
                match self.dialog.confirm(&mut self.store) {
                    Ok(entry) => writeln!(out, "{}: {}", id, entry.describe())?,
                    Err(e) => refused(out, &e)?,
                }
            }
            Command::Cancel => {
                self.dialog.cancel();
                writeln!(out, "Acknowledgment cancelled")?;
            }
            Command::Resolve(id) => {
                let gated = self.store.get(&id).map(|a| a.is_active());
                match gated {
                    Some(false) => writeln!(out, "Resolve is not available for {} (resolved)", id)?,
                    _ => match self.store.resolve(&id) {
                        Ok(entry) => writeln!(out, "{}: {}", id, entry.describe())?,
                        Err(e) => refused(out, &e)?,
                    },
                }
            }
            Command::History { id, newest_first } => match self.store.history(&id) {
                Some(ledger) if newest_first => {
                    writeln!(out, "{}", render::history(ledger.newest_first()))?
                }
                Some(ledger) => writeln!(out, "{}", render::history(ledger.chronological()))?,
                None => writeln!(out, "{}", AlertError::AlertNotFound(id))?,
            },
            Command::Summary => {
                let stats = self.registry.stats(self.store.alerts());
                writeln!(out, "{}", render::summary(&self.store.summary(), &stats))?;
            }
            Command::Conveyors => {
                writeln!(out, "{}", render::conveyors(self.registry.conveyors()))?;
            }
            Command::Users => {
                for user in self.store.roster().users() {
                    writeln!(out, "{}", user)?;
                }
            }
            Command::Export => {
                let snapshot = Snapshot {
                    alerts: self.store.alerts(),
                    summary: self.store.summary(),
                };
                serde_json::to_writer_pretty(&mut *out, &snapshot)?;
                writeln!(out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// The acknowledge action is only offered for `new` alerts
    fn open_dialog<W: Write>(&mut self, id: &str, out: &mut W) -> Result<(), ConsoleError> {
        match self.store.get(id).map(|a| a.status()) {
            None => refused(out, &AlertError::AlertNotFound(id.to_string())),
            Some(AlertStatus::New) => {
                self.dialog.open(id);
                self.show_dialog(out)
            }
            Some(status) => {
                writeln!(out, "Acknowledge is not available for {} ({})", id, status)?;
                Ok(())
            }
        }
    }

    fn show_dialog<W: Write>(&self, out: &mut W) -> Result<(), ConsoleError> {
        let alert = self.dialog.alert_id().and_then(|id| self.store.get(id));
        if let Some(alert) = alert {
            let view = render::dialog(
                alert,
                self.dialog.reason(),
                self.dialog.proof(),
                self.dialog.can_confirm(),
            );
            writeln!(out, "{}", view)?;
        }
        Ok(())
    }
}

fn refused<W: Write>(out: &mut W, err: &AlertError) -> Result<(), ConsoleError> {
    warn!("Action refused: {}", err);
    writeln!(out, "Refused: {}", err)?;
    Ok(())
}

/// Initialize logging to stderr. `RUST_LOG` sets the filter (default
/// `info`); `CONVEYOR_LOG_FORMAT=json` switches to JSON lines.
pub fn init_logging() -> Result<(), ConsoleError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| ConsoleError::Logging(e.to_string()))
}
