//! State-changing actions on a letter.
//!
//! Each action patches the caller's copy of the letter only after the server
//! accepted it; on failure the copy is left untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use super::SuratForm;
use crate::api::{ApiClient, Blob, DownloadProgress};
use crate::errors::ClientError;
use crate::models::{ForwardSuratRequest, SendToJabatanRequest, Surat, SuratStatus};

pub struct SuratProcessing {
    api: Arc<ApiClient>,
}

impl SuratProcessing {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn settle(surat: &mut Surat, updated: Option<Surat>, fallback: SuratStatus) {
        match updated {
            Some(updated) if updated.id == surat.id => *surat = updated,
            _ => surat.apply_status(fallback, Utc::now()),
        }
    }

    /// Disposition by the head of office.
    pub async fn process(&self, surat: &mut Surat, form: &SuratForm) -> Result<(), ClientError> {
        let request = form.to_process_request()?;
        let updated = self.api.process_surat(surat.id, &request).await?;

        surat.disposisi_kepada = Some(request.disposisi_kepada.clone());
        surat.tindakan = Some(request.tindakan.clone());
        surat.sifat = Some(request.sifat.clone());
        surat.catatan = request.catatan.clone();
        Self::settle(surat, updated, SuratStatus::Diproses);
        tracing::info!("Surat {} processed", surat.nomor_surat);
        Ok(())
    }

    /// Forward to one or more subordinates.
    pub async fn forward(
        &self,
        surat: &mut Surat,
        user_ids: Vec<i64>,
        catatan: Option<String>,
    ) -> Result<(), ClientError> {
        let request = ForwardSuratRequest { user_ids, catatan };
        let updated = self.api.forward_surat(surat.id, &request).await?;
        Self::settle(surat, updated, SuratStatus::Diteruskan);
        tracing::info!(
            "Surat {} forwarded to {} users",
            surat.nomor_surat,
            request.user_ids.len()
        );
        Ok(())
    }

    /// Staff acknowledges a forwarded letter.
    pub async fn accept(&self, surat: &mut Surat) -> Result<(), ClientError> {
        let updated = self.api.accept_surat(surat.id).await?;
        Self::settle(surat, updated, SuratStatus::Diterima);
        Ok(())
    }

    /// Secretary routes a letter to a position.
    pub async fn send_to_jabatan(
        &self,
        surat: &mut Surat,
        tujuan_jabatan: &str,
        catatan: Option<String>,
    ) -> Result<(), ClientError> {
        let request = SendToJabatanRequest {
            tujuan_jabatan: tujuan_jabatan.trim().to_string(),
            catatan,
        };
        let updated = self.api.send_surat_to_jabatan(surat.id, &request).await?;
        surat.tujuan_jabatan = Some(request.tujuan_jabatan.clone());
        Self::settle(surat, updated, SuratStatus::Diteruskan);
        Ok(())
    }

    pub async fn download_pdf<F>(&self, surat_id: i64, on_progress: F) -> Result<Blob, ClientError>
    where
        F: FnMut(DownloadProgress),
    {
        let blob = self.api.surat_pdf(surat_id, on_progress).await?;
        if blob.bytes.is_empty() {
            return Err(ClientError::Decode("PDF kosong".to_string()));
        }
        Ok(blob)
    }

    /// Download the disposition sheet into `dir` and return the written path.
    pub async fn save_pdf<F>(
        &self,
        surat: &Surat,
        dir: &Path,
        on_progress: F,
    ) -> Result<PathBuf, ClientError>
    where
        F: FnMut(DownloadProgress),
    {
        let blob = self.download_pdf(surat.id, on_progress).await?;
        let path = dir.join(pdf_filename(surat));
        tokio::fs::write(&path, &blob.bytes).await?;
        tracing::info!("Saved {} ({} bytes)", path.display(), blob.bytes.len());
        Ok(path)
    }
}

/// `disposisi-005-123-2026.pdf` for nomor `005/123/2026`.
pub fn pdf_filename(surat: &Surat) -> String {
    let mut slug = String::new();
    for c in surat.nomor_surat.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        format!("disposisi-{}.pdf", surat.id)
    } else {
        format!("disposisi-{}.pdf", slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surat(nomor: &str) -> Surat {
        serde_json::from_value(serde_json::json!({
            "id": 12,
            "nomor_surat": nomor,
            "asal_instansi": "X",
            "created_at": "2026-10-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename(&surat("005/123/2026")), "disposisi-005-123-2026.pdf");
        assert_eq!(pdf_filename(&surat(" B.12 / Setda ")), "disposisi-b-12-setda.pdf");
        assert_eq!(pdf_filename(&surat("///")), "disposisi-12.pdf");
    }
}
