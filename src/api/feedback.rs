//! Feedback endpoints.

use reqwest::multipart::Form;
use reqwest::Method;

use super::{file_part, ApiClient};
use crate::errors::ClientError;
use crate::models::{Feedback, UploadFile};

/// Changes sent with `PUT /feedback/:id/edit`.
#[derive(Debug, Clone, Default)]
pub struct FeedbackEdit {
    pub notes: String,
    pub new_photos: Vec<UploadFile>,
    /// Ids of existing photos to delete
    pub removed_photo_ids: Vec<i64>,
}

impl ApiClient {
    /// GET /surat/:id/feedback - Feedback entries for a letter.
    pub async fn list_feedback(&self, surat_id: i64) -> Result<Vec<Feedback>, ClientError> {
        self.get_data(&format!("/surat/{}/feedback", surat_id), &[])
            .await
    }

    /// POST /surat/:id/feedback - Submit notes and photos.
    pub async fn create_feedback(
        &self,
        surat_id: i64,
        notes: &str,
        photos: &[UploadFile],
    ) -> Result<Option<Feedback>, ClientError> {
        let mut form = Form::new().text("notes", notes.to_string());
        for photo in photos {
            form = form.part("photos[]", file_part(photo)?);
        }
        self.send_multipart(Method::POST, &format!("/surat/{}/feedback", surat_id), form)
            .await
    }

    /// PUT /feedback/:id/edit - Replace notes, add and remove photos.
    pub async fn edit_feedback(
        &self,
        feedback_id: i64,
        edit: &FeedbackEdit,
    ) -> Result<Option<Feedback>, ClientError> {
        let mut form = Form::new().text("notes", edit.notes.clone());
        for id in &edit.removed_photo_ids {
            form = form.text("remove_photo_ids[]", id.to_string());
        }
        for photo in &edit.new_photos {
            form = form.part("photos[]", file_part(photo)?);
        }
        self.send_multipart(Method::PUT, &format!("/feedback/{}/edit", feedback_id), form)
            .await
    }
}
