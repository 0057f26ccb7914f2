//! Alerting System
//!
//! Alert lifecycle for conveyor monitoring: assignment, acknowledgment
//! with reason and proof, resolution, and the per-alert history ledger.
//!
//! ```text
//! new --acknowledge(reason, proof?)--> acknowledged --resolve()--> resolved
//! new --resolve()--> resolved
//! ```
//!
//! Assignment is orthogonal to status and allowed at any stage.

mod acknowledgment;
mod clock;
mod error;
mod filter;
mod history;
mod roster;
mod settings;
mod store;
mod summary;
mod types;

pub use acknowledgment::{Acknowledgment, AcknowledgmentDialog, ProofAttachment};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AlertError;
pub use filter::{AlertFilter, SeverityFilter, StatusFilter};
pub use history::{HistoryEntry, HistoryKind, HistoryLedger};
pub use roster::UserRoster;
pub use settings::{AlertingConfig, ENV_PREFIX};
pub use store::AlertStore;
pub use summary::AlertSummary;
pub use types::{Alert, AlertCategory, AlertStatus, Severity};
