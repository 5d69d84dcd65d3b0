//! One letter with its feedback, as shown on the processing pages.

use std::sync::Arc;

use chrono::Utc;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{Feedback, Surat, SuratStatus};

pub struct SuratDetail {
    api: Arc<ApiClient>,
    surat_id: i64,
    surat: Option<Surat>,
    feedback: Vec<Feedback>,
    last_error: Option<ClientError>,
}

impl SuratDetail {
    pub fn new(api: Arc<ApiClient>, surat_id: i64) -> Self {
        Self {
            api,
            surat_id,
            surat: None,
            feedback: Vec::new(),
            last_error: None,
        }
    }

    /// Load the letter, then its feedback.
    ///
    /// A feedback failure does not discard the letter.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.api.get_surat(self.surat_id).await {
            Ok(surat) => self.surat = Some(surat),
            Err(e) => {
                self.last_error = Some(e.clone());
                return Err(e);
            }
        }
        self.refresh_feedback().await
    }

    pub async fn refresh_feedback(&mut self) -> Result<(), ClientError> {
        match self.api.list_feedback(self.surat_id).await {
            Ok(feedback) => {
                self.feedback = feedback;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load feedback for surat {}: {}", self.surat_id, e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn surat(&self) -> Option<&Surat> {
        self.surat.as_ref()
    }

    pub fn surat_mut(&mut self) -> Option<&mut Surat> {
        self.surat.as_mut()
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn patch_status(&mut self, status: SuratStatus) {
        if let Some(surat) = self.surat.as_mut() {
            surat.apply_status(status, Utc::now());
        }
    }

    /// Insert or replace a feedback entry after a successful submit or edit.
    pub fn upsert_feedback(&mut self, feedback: Feedback) {
        match self.feedback.iter_mut().find(|f| f.id == feedback.id) {
            Some(existing) => *existing = feedback,
            None => self.feedback.push(feedback),
        }
    }
}
