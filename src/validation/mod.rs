//! Local checks run before anything is uploaded.

use crate::errors::ClientError;
use crate::models::UploadFile;

const MB: u64 = 1024 * 1024;

/// Limits for one kind of upload.
#[derive(Debug, Clone, Copy)]
pub struct UploadRules {
    pub max_files: usize,
    pub max_file_size: u64,
    pub allowed_extensions: &'static [&'static str],
}

pub const POST_UPLOAD_RULES: UploadRules = UploadRules {
    max_files: 10,
    max_file_size: 10 * MB,
    allowed_extensions: &["jpg", "jpeg", "png", "gif", "webp", "pdf"],
};

pub const FEEDBACK_UPLOAD_RULES: UploadRules = UploadRules {
    max_files: 5,
    max_file_size: 5 * MB,
    allowed_extensions: &["jpg", "jpeg", "png", "gif", "webp"],
};

impl UploadRules {
    pub fn check_file(&self, file: &UploadFile) -> Result<(), ClientError> {
        let allowed = file
            .extension()
            .map(|ext| self.allowed_extensions.contains(&ext.as_str()))
            .unwrap_or(false);
        if !allowed {
            return Err(ClientError::Validation(format!(
                "Tipe berkas {} tidak didukung. Gunakan {}",
                file.filename,
                self.allowed_extensions.join(", ")
            )));
        }
        if file.size() > self.max_file_size {
            return Err(ClientError::Validation(format!(
                "Ukuran berkas {} melebihi batas {} MB",
                file.filename,
                self.max_file_size / MB
            )));
        }
        Ok(())
    }

    /// Check a whole selection, counting files that are already attached.
    pub fn check_files(&self, files: &[UploadFile], already_attached: usize) -> Result<(), ClientError> {
        if files.len() + already_attached > self.max_files {
            return Err(ClientError::Validation(format!(
                "Maksimal {} berkas",
                self.max_files
            )));
        }
        files.iter().try_for_each(|f| self.check_file(f))
    }
}

pub fn validate_new_post(caption: &str, files: &[UploadFile]) -> Result<(), ClientError> {
    if caption.trim().is_empty() {
        return Err(ClientError::Validation("Caption wajib diisi".to_string()));
    }
    POST_UPLOAD_RULES.check_files(files, 0)
}

pub fn validate_feedback(
    notes: &str,
    new_photos: &[UploadFile],
    kept_photos: usize,
) -> Result<(), ClientError> {
    if notes.trim().is_empty() && new_photos.is_empty() && kept_photos == 0 {
        return Err(ClientError::Validation(
            "Isi catatan atau lampirkan minimal satu foto".to_string(),
        ));
    }
    FEEDBACK_UPLOAD_RULES.check_files(new_photos, kept_photos)
}

/// Split free-text tag input on commas, spaces and `#`.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(|c: char| c == ',' || c.is_whitespace()) {
        let tag = raw.trim().trim_start_matches('#').to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn file(name: &str, size: usize) -> UploadFile {
        UploadFile::new(name, "application/octet-stream", Bytes::from(vec![0u8; size]))
    }

    #[test]
    fn test_caption_required() {
        let err = validate_new_post("   ", &[]).unwrap_err();
        assert_eq!(err, ClientError::Validation("Caption wajib diisi".to_string()));
        assert!(validate_new_post("Apel pagi", &[file("a.jpg", 10)]).is_ok());
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = validate_new_post("x", &[file("laporan.docx", 10)]).unwrap_err();
        assert!(err.message().contains("laporan.docx"));
        assert!(validate_new_post("x", &[file("tanpa-ekstensi", 10)]).is_err());
        assert!(validate_new_post("x", &[file("SCAN.PDF", 10)]).is_ok());
    }

    #[test]
    fn test_oversized_file_rejected() {
        let big = file("foto.png", (5 * MB + 1) as usize);
        assert!(validate_feedback("catatan", &[big.clone()], 0).is_err());
        assert!(validate_new_post("x", &[big]).is_ok());
    }

    #[test]
    fn test_too_many_files_counts_existing() {
        let photos: Vec<_> = (0..3).map(|i| file(&format!("{}.jpg", i), 1)).collect();
        assert!(validate_feedback("", &photos, 2).is_ok());
        assert!(validate_feedback("", &photos, 3).is_err());
    }

    #[test]
    fn test_feedback_needs_content() {
        assert!(validate_feedback("  ", &[], 0).is_err());
        assert!(validate_feedback("  ", &[], 1).is_ok());
        assert!(validate_feedback("", &[], 0).is_err());
    }

    #[test]
    fn test_pdf_not_allowed_for_feedback() {
        assert!(validate_feedback("x", &[file("a.pdf", 1)], 0).is_err());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags("#Rapat, apel  #rapat,,kunjungan"),
            vec!["rapat", "apel", "kunjungan"]
        );
        assert!(parse_tags(" , ").is_empty());
    }
}
