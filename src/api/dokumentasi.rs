//! Documentation feed endpoints.

use reqwest::multipart::Form;
use reqwest::Method;

use super::{file_part, ApiClient, Page};
use crate::errors::ClientError;
use crate::models::{
    Category, Comment, LikeState, NewComment, Post, UpdatePostRequest, UploadFile, UserStats,
};

/// Filters for the main feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    pub kategori: Option<String>,
    pub search: Option<String>,
}

impl FeedFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(kategori) = self.kategori.as_deref().filter(|k| !k.is_empty()) {
            query.push(("kategori", kategori.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        query
    }
}

/// A new post before upload.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub caption: String,
    pub kategori: Option<String>,
    pub tags: Vec<String>,
    pub files: Vec<UploadFile>,
}

impl ApiClient {
    /// GET /dokumentasi - Main feed page.
    pub async fn list_posts(
        &self,
        filter: &FeedFilter,
        page: u32,
        limit: u32,
    ) -> Result<Page<Post>, ClientError> {
        self.get_page("/dokumentasi", &filter.query(), page, limit)
            .await
    }

    /// GET /dokumentasi/trending - Most liked recent posts.
    pub async fn trending_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.get_data("/dokumentasi/trending", &[]).await
    }

    /// GET /dokumentasi/user/:id - Posts by one user.
    pub async fn user_posts(
        &self,
        user_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<Page<Post>, ClientError> {
        self.get_page(&format!("/dokumentasi/user/{}", user_id), &[], page, limit)
            .await
    }

    /// GET /dokumentasi/search - Full-text search over captions and tags.
    pub async fn search_posts(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<Post>, ClientError> {
        self.get_page(
            "/dokumentasi/search",
            &[("q", query.trim().to_string())],
            page,
            limit,
        )
        .await
    }

    /// POST /dokumentasi - Upload a new post.
    pub async fn create_post(&self, post: &NewPost) -> Result<Option<Post>, ClientError> {
        let mut form = Form::new().text("caption", post.caption.clone());
        if let Some(kategori) = &post.kategori {
            form = form.text("kategori", kategori.clone());
        }
        for tag in &post.tags {
            form = form.text("tags[]", tag.clone());
        }
        for file in &post.files {
            form = form.part("files[]", file_part(file)?);
        }
        self.send_multipart(Method::POST, "/dokumentasi", form).await
    }

    /// PUT /dokumentasi/:id - Edit caption, category and tags.
    pub async fn update_post(
        &self,
        id: i64,
        request: &UpdatePostRequest,
    ) -> Result<Option<Post>, ClientError> {
        self.send_json(Method::PUT, &format!("/dokumentasi/{}", id), Some(request))
            .await
    }

    /// DELETE /dokumentasi/:id
    pub async fn delete_post(&self, id: i64) -> Result<(), ClientError> {
        self.send_json::<(), serde_json::Value>(Method::DELETE, &format!("/dokumentasi/{}", id), None)
            .await?;
        Ok(())
    }

    /// POST /dokumentasi/:id/like - Toggle the current user's like.
    pub async fn toggle_like(&self, id: i64) -> Result<Option<LikeState>, ClientError> {
        self.send_json(Method::POST, &format!("/dokumentasi/{}/like", id), None::<&()>)
            .await
    }

    /// GET /dokumentasi/:id/comments - Flat comment list.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ClientError> {
        self.get_data(&format!("/dokumentasi/{}/comments", post_id), &[])
            .await
    }

    /// POST /dokumentasi/:id/comments
    pub async fn add_comment(
        &self,
        post_id: i64,
        comment: &NewComment,
    ) -> Result<Option<Comment>, ClientError> {
        if comment.content.trim().is_empty() {
            return Err(ClientError::Validation(
                "Komentar tidak boleh kosong".to_string(),
            ));
        }
        self.send_json(
            Method::POST,
            &format!("/dokumentasi/{}/comments", post_id),
            Some(comment),
        )
        .await
    }

    /// DELETE /dokumentasi/comments/:id
    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), ClientError> {
        self.send_json::<(), serde_json::Value>(
            Method::DELETE,
            &format!("/dokumentasi/comments/{}", comment_id),
            None,
        )
        .await?;
        Ok(())
    }

    /// GET /dokumentasi/categories
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get_data("/dokumentasi/categories", &[]).await
    }

    /// GET /dokumentasi/stats/:user_id
    pub async fn user_stats(&self, user_id: i64) -> Result<UserStats, ClientError> {
        self.get_data(&format!("/dokumentasi/stats/{}", user_id), &[])
            .await
    }
}
