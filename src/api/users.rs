//! User lookup endpoints.

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::User;

impl ApiClient {
    /// GET /users/bawahan-bidang-detail - Subordinates a letter can be forwarded to.
    pub async fn bawahan(&self) -> Result<Vec<User>, ClientError> {
        self.get_data("/users/bawahan-bidang-detail", &[]).await
    }
}
