//! Acknowledgment flow
//!
//! An acknowledgment needs a non-empty reason and may carry one image or
//! video as proof. Validation happens here, before the store is touched:
//! an [`Acknowledgment`] can only be built from a reason that is not blank.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::AlertError;
use crate::history::HistoryEntry;
use crate::store::AlertStore;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "heic"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "avi", "mkv", "m4v"];

/// User-selected proof file. Only the display name is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofAttachment {
    name: String,
    media_type: String,
}

impl ProofAttachment {
    /// Accepts `image/*` and `video/*` media types
    pub fn new(name: impl Into<String>, media_type: impl Into<String>) -> Result<Self, AlertError> {
        let name = name.into();
        let media_type = media_type.into().trim().to_ascii_lowercase();

        if name.trim().is_empty() {
            return Err(AlertError::UnsupportedProof("empty file name".to_string()));
        }
        if !(media_type.starts_with("image/") || media_type.starts_with("video/")) {
            return Err(AlertError::UnsupportedProof(format!("{} ({})", name, media_type)));
        }

        Ok(Self { name, media_type })
    }

    /// Infer the media type from the file extension
    pub fn from_file_name(name: impl Into<String>) -> Result<Self, AlertError> {
        let name = name.into();
        let extension = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let media_type = if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            format!("image/{}", if extension == "jpg" { "jpeg" } else { extension.as_str() })
        } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            format!("video/{}", extension)
        } else {
            return Err(AlertError::UnsupportedProof(name));
        };

        Self::new(name, media_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn is_video(&self) -> bool {
        self.media_type.starts_with("video/")
    }
}

/// Validated acknowledgment submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    reason: String,
    proof_file: Option<String>,
}

impl Acknowledgment {
    /// Fails with [`AlertError::EmptyReason`] for blank reasons.
    /// The reason is kept as entered.
    pub fn new(
        reason: impl Into<String>,
        proof: Option<ProofAttachment>,
    ) -> Result<Self, AlertError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(AlertError::EmptyReason);
        }
        Ok(Self {
            reason,
            proof_file: proof.map(|p| p.name),
        })
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn proof_file(&self) -> Option<&str> {
        self.proof_file.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>) {
        (self.reason, self.proof_file)
    }
}

/// Acknowledgment form state for one alert
#[derive(Debug, Clone, Default)]
pub struct AcknowledgmentDialog {
    alert_id: Option<String>,
    reason: String,
    proof: Option<ProofAttachment>,
}

impl AcknowledgmentDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form for an alert, starting from an empty draft
    pub fn open(&mut self, alert_id: impl Into<String>) {
        let alert_id = alert_id.into();
        debug!("Acknowledgment dialog opened for {}", alert_id);
        self.alert_id = Some(alert_id);
        self.reason.clear();
        self.proof = None;
    }

    pub fn is_open(&self) -> bool {
        self.alert_id.is_some()
    }

    pub fn alert_id(&self) -> Option<&str> {
        self.alert_id.as_deref()
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Replace any previously attached proof
    pub fn attach_proof(&mut self, proof: ProofAttachment) {
        self.proof = Some(proof);
    }

    pub fn clear_proof(&mut self) {
        self.proof = None;
    }

    pub fn proof(&self) -> Option<&ProofAttachment> {
        self.proof.as_ref()
    }

    /// Whether the confirm action is enabled
    pub fn can_confirm(&self) -> bool {
        self.is_open() && !self.reason.trim().is_empty()
    }

    /// Submit the draft. On success the draft is cleared and the dialog
    /// closes; on any refusal the dialog stays open with its draft intact.
    pub fn confirm(&mut self, store: &mut AlertStore) -> Result<HistoryEntry, AlertError> {
        let alert_id = self.alert_id.clone().ok_or(AlertError::DialogClosed)?;
        let submission = Acknowledgment::new(self.reason.clone(), self.proof.clone())?;

        let entry = store.acknowledge(&alert_id, submission)?.clone();

        self.close();
        info!("Acknowledgment dialog submitted for {}", alert_id);
        Ok(entry)
    }

    /// Discard the draft and close without touching the alert
    pub fn cancel(&mut self) {
        if let Some(id) = &self.alert_id {
            debug!("Acknowledgment dialog cancelled for {}", id);
        }
        self.close();
    }

    fn close(&mut self) {
        self.alert_id = None;
        self.reason.clear();
        self.proof = None;
    }
}
