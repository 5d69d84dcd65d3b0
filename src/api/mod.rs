//! REST API client.
//!
//! One `ApiClient` carries the base URL and the session; endpoint groups live in
//! the submodules as further `impl ApiClient` blocks.

mod dokumentasi;
mod feedback;
mod surat;
mod users;

pub use dokumentasi::*;
pub use feedback::*;

use bytes::{Bytes, BytesMut};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{UploadFile, User};

/// Success response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Envelope for actions whose `data` may be absent.
#[derive(Debug, Deserialize)]
pub struct ApiAck<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
struct PagedResponse<T> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    data: Vec<T>,
    #[serde(default)]
    pagination: Option<PaginationMeta>,
}

/// One page of a paged list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_more: bool,
    pub total: Option<u64>,
}

/// Binary response body with its declared content type.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Progress of a streamed download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub received: u64,
    pub total: Option<u64>,
}

impl DownloadProgress {
    pub fn percent(&self) -> Option<u8> {
        match self.total {
            Some(0) | None => None,
            Some(total) => Some(((self.received.min(total) * 100) / total) as u8),
        }
    }
}

/// HTTP client bound to one API base URL and one session.
///
/// The bearer token is attached per request and only to URLs on the API's own
/// origin; absolute media URLs pointing elsewhere are fetched without it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    origin: Url,
    auth: HeaderMap,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &Config, session: Session) -> Result<Self, ClientError> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        let origin = Url::parse(&base_url).map_err(|e| {
            ClientError::Validation(format!("Invalid API URL {}: {}", base_url, e))
        })?;
        let auth = session.headers()?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url,
            origin,
            auth,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    /// Absolute URL for an API path. Absolute URLs are passed through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Whether `url` has the same scheme, host and port as the API.
    pub fn is_api_origin(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(url) => {
                url.scheme() == self.origin.scheme()
                    && url.host_str() == self.origin.host_str()
                    && url.port_or_known_default() == self.origin.port_or_known_default()
            }
            Err(_) => false,
        }
    }

    fn authorize(&self, builder: RequestBuilder, url: &str) -> RequestBuilder {
        if self.is_api_origin(url) {
            builder.headers(self.auth.clone())
        } else {
            tracing::debug!("Fetching {} without credentials", url);
            builder
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);
        let builder = self
            .http
            .request(method, &url)
            .header("Accept", "application/json");
        self.authorize(builder, &url)
    }

    /// Turn a non-success response into a `ClientError`.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_response(status.as_u16(), &body);
        tracing::warn!("Request failed: {}", err);
        Err(err)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn reject_unsuccessful(success: Option<bool>, message: Option<String>) -> Result<(), ClientError> {
        if success == Some(false) {
            return Err(ClientError::Server {
                status: 200,
                message: message.unwrap_or_else(|| "Permintaan gagal".to_string()),
            });
        }
        Ok(())
    }

    async fn data<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let envelope: ApiResponse<T> = Self::read_json(builder.send().await?).await?;
        Self::reject_unsuccessful(envelope.success, envelope.message)?;
        Ok(envelope.data)
    }

    /// Action response. An empty body (e.g. `204 No Content`) is a plain success.
    async fn ack<T: DeserializeOwned>(builder: RequestBuilder) -> Result<Option<T>, ClientError> {
        let response = Self::check(builder.send().await?).await?;
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let envelope: ApiAck<T> = serde_json::from_slice(&body)?;
        Self::reject_unsuccessful(envelope.success, envelope.message)?;
        Ok(envelope.data)
    }

    async fn paged<T: DeserializeOwned>(
        builder: RequestBuilder,
        page: u32,
        limit: u32,
    ) -> Result<Page<T>, ClientError> {
        let envelope: PagedResponse<T> = Self::read_json(builder.send().await?).await?;
        Self::reject_unsuccessful(envelope.success, envelope.message)?;

        let (page, has_more, total) = match envelope.pagination {
            Some(meta) => (
                meta.current_page,
                meta.current_page < meta.last_page,
                Some(meta.total),
            ),
            None => (page, envelope.data.len() as u32 >= limit, None),
        };

        Ok(Page {
            items: envelope.data,
            page,
            has_more,
            total,
        })
    }

    pub(crate) async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        Self::data(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        page: u32,
        limit: u32,
    ) -> Result<Page<T>, ClientError> {
        let mut params: Vec<(&str, String)> = query.to_vec();
        params.push(("page", page.to_string()));
        params.push(("limit", limit.to_string()));
        Self::paged(self.request(Method::GET, path).query(&params), page, limit).await
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, ClientError> {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Self::ack(builder).await
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Option<T>, ClientError> {
        Self::ack(self.request(method, path).multipart(form)).await
    }

    /// Fetch a binary resource (photo, attachment) with the session's credentials.
    pub async fn get_blob(&self, path: &str) -> Result<Blob, ClientError> {
        self.download(path, |_| {}).await
    }

    /// Stream a binary resource, reporting progress after every chunk.
    pub async fn download<F>(&self, path: &str, mut on_progress: F) -> Result<Blob, ClientError>
    where
        F: FnMut(DownloadProgress),
    {
        let url = self.url(path);
        tracing::debug!("GET {} (binary)", url);
        let builder = self.authorize(self.http.get(&url), &url);
        let response = Self::check(builder.send().await?).await?;

        let total = response.content_length();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let mut response = response;
        let mut buffer = BytesMut::with_capacity(total.unwrap_or(0).min(64 * 1024 * 1024) as usize);
        on_progress(DownloadProgress { received: 0, total });
        while let Some(chunk) = response.chunk().await? {
            buffer.extend_from_slice(&chunk);
            on_progress(DownloadProgress {
                received: buffer.len() as u64,
                total,
            });
        }

        Ok(Blob {
            bytes: buffer.freeze(),
            content_type,
        })
    }
}

/// Multipart part for an upload.
pub(crate) fn file_part(file: &UploadFile) -> Result<reqwest::multipart::Part, ClientError> {
    reqwest::multipart::Part::bytes(file.bytes.to_vec())
        .file_name(file.filename.clone())
        .mime_str(&file.content_type)
        .map_err(|e| ClientError::Validation(format!("Tipe berkas tidak valid: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let config = Config {
            api_url: base.to_string(),
            api_token: None,
            timeout: std::time::Duration::from_secs(5),
            log_level: "warn".to_string(),
            log_format: crate::config::LogFormat::Text,
        };
        ApiClient::new(&config, Session::new("t")).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let api = client("http://localhost:8000/api/");
        assert_eq!(api.url("/dashboard"), "http://localhost:8000/api/dashboard");
        assert_eq!(api.url("surat/1"), "http://localhost:8000/api/surat/1");
        assert_eq!(
            api.url("https://cdn.example.go.id/f/1.jpg"),
            "https://cdn.example.go.id/f/1.jpg"
        );
    }

    #[test]
    fn test_credentials_stay_on_api_origin() {
        let api = client("http://localhost:8000/api");
        assert!(api.is_api_origin("http://localhost:8000/api/media/1"));
        assert!(api.is_api_origin("http://localhost:8000/storage/foto.jpg"));
        assert!(!api.is_api_origin("http://localhost:9000/api/media/1"));
        assert!(!api.is_api_origin("https://localhost:8000/api/media/1"));
        assert!(!api.is_api_origin("https://cdn.example.go.id/f/1.jpg"));
        assert!(!api.is_api_origin("not a url"));

        let api = client("https://dispoma.example.go.id/api");
        assert!(api.is_api_origin("https://dispoma.example.go.id:443/storage/1.pdf"));
    }

    #[test]
    fn test_download_progress_percent() {
        let p = DownloadProgress {
            received: 50,
            total: Some(200),
        };
        assert_eq!(p.percent(), Some(25));
        let p = DownloadProgress {
            received: 10,
            total: None,
        };
        assert_eq!(p.percent(), None);
        let p = DownloadProgress {
            received: 300,
            total: Some(200),
        };
        assert_eq!(p.percent(), Some(100));
    }
}
