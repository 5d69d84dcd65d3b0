//! Session context passed explicitly to the API client.
//!
//! Login and token issuance happen on the server; the client only carries the
//! resulting bearer token and the signed-in user.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::errors::ClientError;
use crate::models::{Role, User};

/// Authenticated session for one signed-in user.
#[derive(Clone)]
pub struct Session {
    token: String,
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role.clone())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Authorization header for requests to the API origin.
    pub fn headers(&self) -> Result<HeaderMap, ClientError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| ClientError::Unauthorized("Token contains invalid characters".into()))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}
