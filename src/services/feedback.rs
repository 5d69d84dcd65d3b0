//! Feedback submission and the one-hour edit window.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::api::{ApiClient, FeedbackEdit};
use crate::errors::ClientError;
use crate::models::{Feedback, UploadFile};
use crate::validation::{validate_feedback, FEEDBACK_UPLOAD_RULES};

/// Period during which a feedback entry may be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditWindow {
    deadline: DateTime<Utc>,
}

impl EditWindow {
    pub fn for_feedback(feedback: &Feedback) -> Self {
        Self {
            deadline: feedback.edit_deadline(),
        }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        now < self.deadline
    }

    /// Time left, zero once closed.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).max(Duration::zero())
    }

    /// `MM:SS` countdown for the edit button.
    pub fn countdown(&self, now: DateTime<Utc>) -> String {
        let secs = self.remaining(now).num_seconds();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Submit new feedback for a letter.
pub async fn submit_feedback(
    api: &ApiClient,
    surat_id: i64,
    notes: &str,
    photos: &[UploadFile],
) -> Result<Option<Feedback>, ClientError> {
    validate_feedback(notes, photos, 0)?;
    api.create_feedback(surat_id, notes.trim(), photos).await
}

/// Edit session for one existing feedback entry.
pub struct FeedbackEditor {
    api: Arc<ApiClient>,
    original: Feedback,
    window: EditWindow,
    pub notes: String,
    removed_photo_ids: Vec<i64>,
    new_photos: Vec<UploadFile>,
}

impl FeedbackEditor {
    pub fn new(api: Arc<ApiClient>, feedback: Feedback) -> Self {
        Self {
            window: EditWindow::for_feedback(&feedback),
            notes: feedback.notes.clone(),
            api,
            original: feedback,
            removed_photo_ids: Vec::new(),
            new_photos: Vec::new(),
        }
    }

    pub fn window(&self) -> EditWindow {
        self.window
    }

    /// Only the author may edit, and only while the window is open.
    pub fn can_edit(&self, now: DateTime<Utc>) -> bool {
        let is_author = match self.api.session().user_id() {
            Some(user_id) => self.original.is_owned_by(user_id),
            None => true,
        };
        is_author && self.window.is_open(now)
    }

    /// Existing photos that will remain after the edit.
    pub fn kept_photo_count(&self) -> usize {
        self.original
            .photos
            .iter()
            .filter(|p| !self.removed_photo_ids.contains(&p.id))
            .count()
    }

    pub fn remove_photo(&mut self, photo_id: i64) -> bool {
        let exists = self.original.photos.iter().any(|p| p.id == photo_id);
        if exists && !self.removed_photo_ids.contains(&photo_id) {
            self.removed_photo_ids.push(photo_id);
            return true;
        }
        false
    }

    pub fn add_photo(&mut self, photo: UploadFile) -> Result<(), ClientError> {
        FEEDBACK_UPLOAD_RULES.check_file(&photo)?;
        if self.kept_photo_count() + self.new_photos.len() >= FEEDBACK_UPLOAD_RULES.max_files {
            return Err(ClientError::Validation(format!(
                "Maksimal {} foto",
                FEEDBACK_UPLOAD_RULES.max_files
            )));
        }
        self.new_photos.push(photo);
        Ok(())
    }

    pub async fn submit(&self, now: DateTime<Utc>) -> Result<Feedback, ClientError> {
        if !self.window.is_open(now) {
            return Err(ClientError::Validation(
                "Batas waktu edit feedback (1 jam) telah berakhir".to_string(),
            ));
        }
        if !self.can_edit(now) {
            return Err(ClientError::Unauthorized(
                "Hanya pembuat feedback yang dapat mengubahnya".to_string(),
            ));
        }
        validate_feedback(&self.notes, &self.new_photos, self.kept_photo_count())?;

        let edit = FeedbackEdit {
            notes: self.notes.trim().to_string(),
            new_photos: self.new_photos.clone(),
            removed_photo_ids: self.removed_photo_ids.clone(),
        };
        let updated = self.api.edit_feedback(self.original.id, &edit).await?;

        Ok(updated.unwrap_or_else(|| {
            let mut patched = self.original.clone();
            patched.notes = edit.notes.clone();
            patched
                .photos
                .retain(|p| !edit.removed_photo_ids.contains(&p.id));
            patched.updated_at = Some(now);
            patched
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn feedback_created_at(created_at: DateTime<Utc>) -> Feedback {
        Feedback {
            id: 1,
            surat_id: 1,
            notes: "Sudah dilaksanakan".to_string(),
            photos: Vec::new(),
            user: None,
            created_at,
            updated_at: None,
        }
    }

    #[test]
    fn test_window_open_for_one_hour() {
        let created = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();
        let window = EditWindow::for_feedback(&feedback_created_at(created));

        let now = created + Duration::minutes(15);
        assert!(window.is_open(now));
        assert_eq!(window.remaining(now), Duration::minutes(45));
        assert_eq!(window.countdown(now), "45:00");

        let now = created + Duration::seconds(3599);
        assert_eq!(window.countdown(now), "00:01");

        let now = created + Duration::hours(1);
        assert!(!window.is_open(now));
        assert_eq!(window.remaining(now), Duration::zero());
        assert_eq!(window.countdown(now + Duration::hours(5)), "00:00");
    }
}
