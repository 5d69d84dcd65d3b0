//! Letter endpoints.

use reqwest::Method;

use super::{ApiClient, Blob, DownloadProgress};
use crate::errors::ClientError;
use crate::models::{
    DashboardSummary, ForwardSuratRequest, ProcessSuratRequest, Role, SendToJabatanRequest, Surat,
};

impl ApiClient {
    /// GET /dashboard - Totals and recent letters for the signed-in user.
    pub async fn dashboard(&self) -> Result<DashboardSummary, ClientError> {
        self.get_data("/dashboard", &[]).await
    }

    /// Incoming letters visible to a role.
    ///
    /// Kepala see the letters addressed to them; every other role gets the full list.
    pub async fn list_surat_masuk(&self, role: &Role) -> Result<Vec<Surat>, ClientError> {
        let path = match role {
            Role::Kepala => "/kepala/surat-masuk",
            _ => "/surat-masuk/all",
        };
        self.get_data(path, &[]).await
    }

    /// GET /surat/:id - A single letter.
    pub async fn get_surat(&self, id: i64) -> Result<Surat, ClientError> {
        self.get_data(&format!("/surat/{}", id), &[]).await
    }

    /// POST /surat/:id/process - Disposition by the head of office.
    pub async fn process_surat(
        &self,
        id: i64,
        request: &ProcessSuratRequest,
    ) -> Result<Option<Surat>, ClientError> {
        self.send_json(Method::POST, &format!("/surat/{}/process", id), Some(request))
            .await
    }

    /// POST /surat/:id/forward - Hand a letter to subordinates.
    pub async fn forward_surat(
        &self,
        id: i64,
        request: &ForwardSuratRequest,
    ) -> Result<Option<Surat>, ClientError> {
        if request.user_ids.is_empty() {
            return Err(ClientError::Validation(
                "Pilih minimal satu penerima".to_string(),
            ));
        }
        self.send_json(Method::POST, &format!("/surat/{}/forward", id), Some(request))
            .await
    }

    /// POST /surat/:id/accept - Staff acknowledges a forwarded letter.
    pub async fn accept_surat(&self, id: i64) -> Result<Option<Surat>, ClientError> {
        self.send_json(Method::POST, &format!("/surat/{}/accept", id), None::<&()>)
            .await
    }

    /// POST /surat/:id/send-to-jabatan - Secretary routes a letter to a position.
    pub async fn send_surat_to_jabatan(
        &self,
        id: i64,
        request: &SendToJabatanRequest,
    ) -> Result<Option<Surat>, ClientError> {
        if request.tujuan_jabatan.trim().is_empty() {
            return Err(ClientError::Validation(
                "Jabatan tujuan wajib dipilih".to_string(),
            ));
        }
        self.send_json(
            Method::POST,
            &format!("/surat/{}/send-to-jabatan", id),
            Some(request),
        )
        .await
    }

    /// GET /surat/:id/pdf - Server-rendered disposition sheet.
    pub async fn surat_pdf<F>(&self, id: i64, on_progress: F) -> Result<Blob, ClientError>
    where
        F: FnMut(DownloadProgress),
    {
        self.download(&format!("/surat/{}/pdf", id), on_progress).await
    }
}
