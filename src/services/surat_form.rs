//! Disposition form state.

use crate::errors::ClientError;
use crate::models::{ProcessSuratRequest, Sifat, Surat};
use crate::tindakan::TindakanSelection;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuratForm {
    pub disposisi_kepada: String,
    pub tindakan: TindakanSelection,
    pub sifat: Sifat,
    pub catatan: String,
}

impl SuratForm {
    /// Prefill from a letter that may already carry a disposition.
    pub fn from_surat(surat: &Surat) -> Self {
        Self {
            disposisi_kepada: surat.disposisi_kepada.clone().unwrap_or_default(),
            tindakan: surat
                .tindakan
                .as_deref()
                .map(TindakanSelection::parse)
                .unwrap_or_default(),
            sifat: surat.sifat.clone().unwrap_or_default(),
            catatan: surat.catatan.clone().unwrap_or_default(),
        }
    }

    pub fn toggle_tindakan(&mut self, action: &str) -> bool {
        self.tindakan.toggle(action)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.disposisi_kepada.trim().is_empty() {
            return Err(ClientError::Validation(
                "Tujuan disposisi wajib diisi".to_string(),
            ));
        }
        if self.tindakan.is_empty() {
            return Err(ClientError::Validation(
                "Pilih minimal satu tindakan".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_process_request(&self) -> Result<ProcessSuratRequest, ClientError> {
        self.validate()?;
        let catatan = self.catatan.trim();
        Ok(ProcessSuratRequest {
            disposisi_kepada: self.disposisi_kepada.trim().to_string(),
            tindakan: self.tindakan.to_wire()?,
            sifat: self.sifat.clone(),
            catatan: (!catatan.is_empty()).then(|| catatan.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surat_with_tindakan(tindakan: &str) -> Surat {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "nomor_surat": "005/9/2026",
            "asal_instansi": "Inspektorat",
            "disposisi_kepada": "Kabid Umum",
            "tindakan": tindakan,
            "sifat": "segera",
            "created_at": "2026-10-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_load_edit_submit_round_trip() {
        let mut form = SuratForm::from_surat(&surat_with_tindakan("A, B, C"));
        assert_eq!(form.tindakan.items(), ["A", "B", "C"]);

        assert!(!form.toggle_tindakan("B"));
        let request = form.to_process_request().unwrap();
        assert_eq!(request.tindakan, "A, C");
        assert_eq!(request.sifat, Sifat::Segera);
        assert_eq!(request.disposisi_kepada, "Kabid Umum");
        assert!(request.catatan.is_none());
    }

    #[test]
    fn test_validation() {
        let mut form = SuratForm::default();
        assert!(form.validate().is_err());

        form.disposisi_kepada = "Sekretaris".to_string();
        assert!(matches!(
            form.to_process_request(),
            Err(ClientError::Validation(msg)) if msg.contains("tindakan")
        ));

        form.toggle_tindakan("Untuk diketahui");
        form.catatan = "  segera  ".to_string();
        let request = form.to_process_request().unwrap();
        assert_eq!(request.catatan.as_deref(), Some("segera"));
    }

    #[test]
    fn test_blank_surat_gives_empty_form() {
        let surat: Surat = serde_json::from_value(serde_json::json!({
            "id": 2,
            "nomor_surat": "1",
            "asal_instansi": "X",
            "created_at": "2026-10-01T00:00:00Z"
        }))
        .unwrap();
        let form = SuratForm::from_surat(&surat);
        assert_eq!(form, SuratForm::default());
    }
}
