//! Media descriptors for photos and documents served behind authentication.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A photo or file attached to a letter, feedback or post.
///
/// `url` is an API path that must be fetched with the session's credentials;
/// it is not a public static URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaFile {
    pub id: i64,
    pub filename: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl MediaFile {
    pub fn kind(&self) -> MediaKind {
        match &self.mime_type {
            Some(mime) => MediaKind::from_mime(mime),
            None => MediaKind::from_filename(&self.filename),
        }
    }

    pub fn extension(&self) -> Option<String> {
        extension_of(&self.filename)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Pdf,
    Other,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime == "application/pdf" {
            MediaKind::Pdf
        } else {
            MediaKind::Other
        }
    }

    pub fn from_filename(filename: &str) -> Self {
        match extension_of(filename).as_deref() {
            Some("jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp") => MediaKind::Image,
            Some("pdf") => MediaKind::Pdf,
            _ => MediaKind::Other,
        }
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// A file selected locally for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn extension(&self) -> Option<String> {
        extension_of(&self.filename)
    }
}
