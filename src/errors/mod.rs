//! Error handling module for the Dispoma client.
//!
//! Provides a single client error type, the server error envelope and the
//! localized messages shown to users when a request fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
}

/// Client error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No response was received (connect failure, timeout)
    Network(String),
    /// Session missing, expired or lacking permission
    Unauthorized(String),
    /// Resource not found
    NotFound(String),
    /// Any other error response reported by the server
    Server { status: u16, message: String },
    /// Local validation rejected the input before any request was made
    Validation(String),
    /// Response body did not match the expected schema
    Decode(String),
    /// Local file system error
    Io(String),
}

impl ClientError {
    /// Build an error from a non-success HTTP status and the raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = ServerErrorBody::parse(body)
            .map(|b| b.summary())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));

        match status {
            401 | 403 => ClientError::Unauthorized(message),
            404 => ClientError::NotFound(message),
            422 => ClientError::Validation(message),
            _ => ClientError::Server { status, message },
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => codes::NETWORK_ERROR,
            ClientError::Unauthorized(_) => codes::UNAUTHORIZED,
            ClientError::NotFound(_) => codes::NOT_FOUND,
            ClientError::Server { .. } => codes::SERVER_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Io(_) => codes::IO_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Network(msg) => msg.clone(),
            ClientError::Unauthorized(msg) => msg.clone(),
            ClientError::NotFound(msg) => msg.clone(),
            ClientError::Server { message, .. } => message.clone(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::Io(msg) => msg.clone(),
        }
    }

    /// Localized text suitable for a toast notification.
    ///
    /// Server and validation messages are already written for end users and are
    /// passed through; transport-level failures get a fixed Indonesian sentence.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => {
                "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.".to_string()
            }
            ClientError::Unauthorized(_) => {
                "Sesi Anda telah berakhir atau Anda tidak memiliki akses.".to_string()
            }
            ClientError::NotFound(_) => "Data tidak ditemukan.".to_string(),
            ClientError::Server { message, .. } if !message.starts_with("HTTP ") => {
                message.clone()
            }
            ClientError::Server { .. } => "Terjadi kesalahan pada server.".to_string(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Decode(_) => "Respons server tidak dapat dibaca.".to_string(),
            ClientError::Io(_) => "Gagal menyimpan berkas.".to_string(),
        }
    }

    /// Whether a manual retry of the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            return ClientError::Decode(format!("Decode error: {}", err));
        }
        match err.status() {
            Some(status) => ClientError::from_response(status.as_u16(), ""),
            None => ClientError::Network(format!("Network error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("IO error: {:?}", err);
        ClientError::Io(format!("IO error: {}", err))
    }
}

/// Error payload returned by the API on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Field-level validation messages
    #[serde(default)]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl ServerErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Single-line message combining the top-level and first field error.
    pub fn summary(&self) -> String {
        let top = self
            .message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_default();

        let first_field = self.errors.as_ref().and_then(|errors| {
            let mut fields: Vec<_> = errors.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            fields
                .into_iter()
                .find_map(|(_, msgs)| msgs.first().cloned())
        });

        match first_field {
            Some(field) if top.is_empty() => field,
            Some(field) if field != top => format!("{} ({})", top, field),
            _ => top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_maps_status() {
        let err = ClientError::from_response(401, r#"{"message":"Unauthenticated."}"#);
        assert_eq!(err, ClientError::Unauthorized("Unauthenticated.".to_string()));

        let err = ClientError::from_response(404, "");
        assert_eq!(err.error_code(), codes::NOT_FOUND);
        assert_eq!(err.message(), "HTTP 404");

        let err = ClientError::from_response(500, "<html>oops</html>");
        assert_eq!(
            err,
            ClientError::Server {
                status: 500,
                message: "HTTP 500".to_string()
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_validation_payload_summary() {
        let body = r#"{
            "message": "Data tidak valid",
            "errors": { "caption": ["Caption wajib diisi"] }
        }"#;
        let err = ClientError::from_response(422, body);
        assert_eq!(
            err,
            ClientError::Validation("Data tidak valid (Caption wajib diisi)".to_string())
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_user_message_localized() {
        let err = ClientError::Network("connection refused".to_string());
        assert!(err.user_message().starts_with("Tidak dapat terhubung"));

        let err = ClientError::Server {
            status: 400,
            message: "Surat sudah diproses".to_string(),
        };
        assert_eq!(err.user_message(), "Surat sudah diproses");

        let err = ClientError::Server {
            status: 502,
            message: "HTTP 502".to_string(),
        };
        assert_eq!(err.user_message(), "Terjadi kesalahan pada server.");
    }

    #[test]
    fn test_display_includes_code() {
        let err = ClientError::Validation("Caption wajib diisi".to_string());
        assert_eq!(err.to_string(), "VALIDATION_ERROR: Caption wajib diisi");
    }
}
