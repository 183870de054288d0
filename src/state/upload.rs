//! The flag-document dialog.
//!
//! ```text
//! Closed --open--> Open --submit--> Submitting --rejected/error--> Open
//!                   ^                    |
//!                   |                 accepted
//!                cancel                  v
//!                 (any) <--2s timer-- Succeeded
//! ```

use crate::error::{ApiResult, ValidationError};
use crate::state::view::StatusLine;
use crate::types::{DocumentUpload, SelectedFile, UploadOutcome};
use std::time::Duration;

pub const AUTO_CLOSE_DELAY: Duration = Duration::from_secs(2);
pub const UPLOADING: &str = "⏳ Uploading & processing document...";
pub const UPLOADED: &str = "✅ Document uploaded & indexed successfully.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogPhase {
    #[default]
    Closed,
    Open,
    Submitting,
    Succeeded,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadDraft {
    pub title: String,
    pub description: String,
    pub folder: String,
    pub file: Option<SelectedFile>,
}

impl UploadDraft {
    pub fn validate(&self) -> Result<DocumentUpload, ValidationError> {
        let file = self.file.clone().ok_or(ValidationError::MissingFile)?;
        Ok(DocumentUpload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            folder: self.folder.trim().to_string(),
            file,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadDialog {
    phase: DialogPhase,
    /// Incremented on every open so late completions and timers can tell
    /// whether they still belong to the visible dialog.
    generation: u64,
    pub draft: UploadDraft,
    pub status: StatusLine,
}

impl UploadDialog {
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_open(&self) -> bool {
        self.phase != DialogPhase::Closed
    }

    pub fn can_submit(&self) -> bool {
        self.phase == DialogPhase::Open
    }

    pub fn open(&mut self) {
        if self.phase != DialogPhase::Closed {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.status = StatusLine::default();
        self.phase = DialogPhase::Open;
    }

    pub fn close(&mut self) {
        self.phase = DialogPhase::Closed;
    }

    /// Validate the draft and move to `Submitting`.
    ///
    /// `None` when the dialog is not accepting input or the draft is
    /// invalid; the status line says why in the latter case.
    pub fn begin_submit(&mut self) -> Option<DocumentUpload> {
        if !self.can_submit() {
            return None;
        }
        self.status = StatusLine::neutral(UPLOADING);
        match self.draft.validate() {
            Ok(upload) => {
                self.phase = DialogPhase::Submitting;
                Some(upload)
            }
            Err(err) => {
                self.status = StatusLine::error(err.to_string());
                None
            }
        }
    }

    /// Apply the server's verdict. Returns the generation to auto-close
    /// when the upload was accepted.
    pub fn finish_submit(
        &mut self,
        generation: u64,
        result: ApiResult<UploadOutcome>,
    ) -> Option<u64> {
        if generation != self.generation || self.phase != DialogPhase::Submitting {
            tracing::debug!("ignoring upload result for a dialog that is gone");
            return None;
        }

        match result {
            Ok(UploadOutcome::Accepted) => {
                tracing::info!("document flagged");
                self.status = StatusLine::success(UPLOADED);
                self.phase = DialogPhase::Succeeded;
                return Some(generation);
            }
            Ok(UploadOutcome::Rejected { status, body }) => {
                tracing::warn!("flag rejected with {}", status);
                self.status = StatusLine::error(format!("Upload failed: {body}"));
            }
            Err(err) => {
                tracing::warn!("flag request failed: {}", err);
                self.status = StatusLine::error(format!("Error: {err}"));
            }
        }
        self.phase = DialogPhase::Open;
        None
    }

    /// Timer callback after a successful upload.
    pub fn auto_close(&mut self, generation: u64) {
        if generation == self.generation && self.phase == DialogPhase::Succeeded {
            self.phase = DialogPhase::Closed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::theme::Tone;

    fn draft_with_file() -> UploadDraft {
        UploadDraft {
            title: "  Q3 plan ".into(),
            description: "".into(),
            folder: " private ".into(),
            file: Some(SelectedFile {
                name: "plan.md".into(),
                bytes: b"# plan".to_vec(),
            }),
        }
    }

    #[test]
    fn open_clears_status_and_keeps_fields() {
        let mut dialog = UploadDialog::default();
        dialog.draft.title = "kept".into();
        dialog.status = StatusLine::error("old");
        dialog.open();
        assert_eq!(dialog.phase(), DialogPhase::Open);
        assert!(dialog.status.is_empty());
        assert_eq!(dialog.draft.title, "kept");
    }

    #[test]
    fn missing_file_stays_open() {
        let mut dialog = UploadDialog::default();
        dialog.open();
        assert_eq!(dialog.begin_submit(), None);
        assert_eq!(dialog.status, StatusLine::error("Please select a file."));
        assert!(dialog.can_submit());
    }

    #[test]
    fn submit_trims_fields_and_blocks_reentry() {
        let mut dialog = UploadDialog {
            draft: draft_with_file(),
            ..Default::default()
        };
        dialog.open();
        let upload = dialog.begin_submit().unwrap();
        assert_eq!(upload.title, "Q3 plan");
        assert_eq!(upload.folder, "private");
        assert_eq!(upload.file.name, "plan.md");
        assert_eq!(dialog.status.text, UPLOADING);
        assert_eq!(dialog.phase(), DialogPhase::Submitting);
        assert_eq!(dialog.begin_submit(), None);
    }

    #[test]
    fn rejection_and_errors_reopen() {
        let mut dialog = UploadDialog {
            draft: draft_with_file(),
            ..Default::default()
        };
        dialog.open();
        let generation = dialog.generation();

        dialog.begin_submit().unwrap();
        let outcome = Ok(UploadOutcome::Rejected {
            status: 403,
            body: "Only private users can flag documents".into(),
        });
        assert_eq!(dialog.finish_submit(generation, outcome), None);
        assert_eq!(
            dialog.status.text,
            "Upload failed: Only private users can flag documents"
        );
        assert_eq!(dialog.status.tone, Tone::Error);
        assert!(dialog.can_submit());

        dialog.begin_submit().unwrap();
        let failed = Err(ApiError::Transport("connection refused".into()));
        assert_eq!(dialog.finish_submit(generation, failed), None);
        assert_eq!(dialog.status.text, "Error: connection refused");
        assert!(dialog.can_submit());
    }

    #[test]
    fn stale_timer_does_not_close_reopened_dialog() {
        let mut dialog = UploadDialog {
            draft: draft_with_file(),
            ..Default::default()
        };
        dialog.open();
        let first = dialog.generation();
        dialog.begin_submit().unwrap();
        assert_eq!(
            dialog.finish_submit(first, Ok(UploadOutcome::Accepted)),
            Some(first)
        );

        dialog.close();
        dialog.open();
        dialog.auto_close(first);
        assert_eq!(dialog.phase(), DialogPhase::Open);
    }

    #[test]
    fn late_result_after_cancel_is_ignored() {
        let mut dialog = UploadDialog {
            draft: draft_with_file(),
            ..Default::default()
        };
        dialog.open();
        let generation = dialog.generation();
        dialog.begin_submit().unwrap();
        dialog.close();
        assert_eq!(
            dialog.finish_submit(generation, Ok(UploadOutcome::Accepted)),
            None
        );
        assert!(!dialog.is_open());
    }
}
