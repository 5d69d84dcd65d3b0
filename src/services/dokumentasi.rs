//! Documentation feed: API calls routed through one `PostStore`.
//!
//! Methods take `&self`; the store sits behind a lock that is never held
//! across a request, so overlapping loads are possible and the page tickets
//! decide which answer wins.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::{ApiClient, FeedFilter, NewPost, Page};
use crate::errors::ClientError;
use crate::models::{thread_comments, Category, NewComment, Post, UpdatePostRequest, UserStats};
use crate::pagination::{PageApply, PageTicket};
use crate::store::{FeedView, PostStore};
use crate::validation::validate_new_post;

#[derive(Default)]
struct FeedState {
    store: PostStore,
    filter: FeedFilter,
    search_query: String,
    profile_user: Option<i64>,
    last_error: Option<ClientError>,
}

pub struct DokumentasiFeed {
    api: Arc<ApiClient>,
    state: RwLock<FeedState>,
}

impl DokumentasiFeed {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: RwLock::new(FeedState::default()),
        }
    }

    /// Posts currently shown in `view`.
    pub async fn posts(&self, view: FeedView) -> Vec<Post> {
        let state = self.state.read().await;
        state.store.view(view).into_iter().cloned().collect()
    }

    pub async fn post(&self, id: i64) -> Option<Post> {
        let state = self.state.read().await;
        state.store.get(id).cloned()
    }

    pub async fn has_more(&self, view: FeedView) -> bool {
        let state = self.state.read().await;
        state.store.has_more(view)
    }

    pub async fn filter(&self) -> FeedFilter {
        self.state.read().await.filter.clone()
    }

    pub async fn last_error(&self) -> Option<ClientError> {
        self.state.read().await.last_error.clone()
    }

    async fn record_error(&self, err: &ClientError) {
        tracing::warn!("Dokumentasi request failed: {}", err);
        self.state.write().await.last_error = Some(err.clone());
    }

    async fn finish(
        &self,
        view: FeedView,
        ticket: PageTicket,
        result: Result<Page<Post>, ClientError>,
    ) -> Result<PageApply, ClientError> {
        let mut state = self.state.write().await;
        match result {
            Ok(page) => {
                state.last_error = None;
                Ok(state.store.ingest(view, ticket, page.items, page.has_more))
            }
            // Superseded by a newer request; its failure no longer matters
            Err(e) if !state.store.is_current(view, ticket) => {
                tracing::debug!("Ignoring failed stale {:?} page {}: {}", view, ticket.page, e);
                Ok(PageApply::Stale)
            }
            Err(e) => {
                tracing::warn!("Failed to load {:?} page {}: {}", view, ticket.page, e);
                state.store.fail(view, ticket);
                state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Load page 1 of the main feed. A changed filter clears the list first.
    pub async fn load_feed(&self, filter: FeedFilter) -> Result<PageApply, ClientError> {
        let ticket = {
            let mut state = self.state.write().await;
            if state.filter != filter {
                state.filter = filter.clone();
                state.store.reset(FeedView::Feed);
            }
            state.store.begin(FeedView::Feed, 1)
        };
        let result = self
            .api
            .list_posts(&filter, 1, FeedView::Feed.page_size())
            .await;
        self.finish(FeedView::Feed, ticket, result).await
    }

    /// Append the next feed page. `None` when nothing is left to load.
    pub async fn load_more_feed(&self) -> Result<Option<PageApply>, ClientError> {
        let (ticket, filter) = {
            let mut state = self.state.write().await;
            match state.store.begin_next(FeedView::Feed) {
                Some(ticket) => (ticket, state.filter.clone()),
                None => return Ok(None),
            }
        };
        let result = self
            .api
            .list_posts(&filter, ticket.page, FeedView::Feed.page_size())
            .await;
        self.finish(FeedView::Feed, ticket, result).await.map(Some)
    }

    pub async fn load_trending(&self) -> Result<PageApply, ClientError> {
        let ticket = self.state.write().await.store.begin(FeedView::Trending, 1);
        let result = self.api.trending_posts().await.map(|items| Page {
            items,
            page: 1,
            has_more: false,
            total: None,
        });
        self.finish(FeedView::Trending, ticket, result).await
    }

    /// Load page 1 of a user's posts; switching users clears the list.
    pub async fn load_profile(&self, user_id: i64) -> Result<PageApply, ClientError> {
        let ticket = {
            let mut state = self.state.write().await;
            if state.profile_user != Some(user_id) {
                state.profile_user = Some(user_id);
                state.store.reset(FeedView::Profile);
            }
            state.store.begin(FeedView::Profile, 1)
        };
        let result = self
            .api
            .user_posts(user_id, 1, FeedView::Profile.page_size())
            .await;
        self.finish(FeedView::Profile, ticket, result).await
    }

    pub async fn load_more_profile(&self) -> Result<Option<PageApply>, ClientError> {
        let (ticket, user_id) = {
            let mut state = self.state.write().await;
            let Some(user_id) = state.profile_user else {
                return Ok(None);
            };
            match state.store.begin_next(FeedView::Profile) {
                Some(ticket) => (ticket, user_id),
                None => return Ok(None),
            }
        };
        let result = self
            .api
            .user_posts(user_id, ticket.page, FeedView::Profile.page_size())
            .await;
        self.finish(FeedView::Profile, ticket, result).await.map(Some)
    }

    /// Run a new search. A blank query just clears the results.
    pub async fn search(&self, query: &str) -> Result<PageApply, ClientError> {
        let query = query.trim().to_string();
        let ticket = {
            let mut state = self.state.write().await;
            if state.search_query != query {
                state.search_query = query.clone();
                state.store.reset(FeedView::Search);
            }
            if query.is_empty() {
                state.store.reset(FeedView::Search);
                return Ok(PageApply::Replaced { count: 0 });
            }
            state.store.begin(FeedView::Search, 1)
        };
        let result = self
            .api
            .search_posts(&query, 1, FeedView::Search.page_size())
            .await;
        self.finish(FeedView::Search, ticket, result).await
    }

    pub async fn load_more_search(&self) -> Result<Option<PageApply>, ClientError> {
        let (ticket, query) = {
            let mut state = self.state.write().await;
            if state.search_query.is_empty() {
                return Ok(None);
            }
            match state.store.begin_next(FeedView::Search) {
                Some(ticket) => (ticket, state.search_query.clone()),
                None => return Ok(None),
            }
        };
        let result = self
            .api
            .search_posts(&query, ticket.page, FeedView::Search.page_size())
            .await;
        self.finish(FeedView::Search, ticket, result).await.map(Some)
    }

    /// Like or unlike. Applied at once, settled by the server's answer and
    /// rolled back if the request fails.
    pub async fn toggle_like(&self, post_id: i64) -> Result<(bool, u64), ClientError> {
        let optimistic = self
            .state
            .write()
            .await
            .store
            .toggle_like(post_id)
            .ok_or_else(|| ClientError::NotFound(format!("Post {} not loaded", post_id)))?;

        match self.api.toggle_like(post_id).await {
            Ok(Some(server)) => {
                let mut state = self.state.write().await;
                state
                    .store
                    .apply_like(post_id, server.is_liked, server.like_count);
                Ok((server.is_liked, server.like_count))
            }
            Ok(None) => Ok(optimistic),
            Err(e) => {
                let mut state = self.state.write().await;
                state.store.toggle_like(post_id);
                state.last_error = Some(e.clone());
                tracing::warn!("Like on post {} rolled back: {}", post_id, e);
                Err(e)
            }
        }
    }

    pub async fn load_comments(&self, post_id: i64) -> Result<usize, ClientError> {
        match self.api.list_comments(post_id).await {
            Ok(flat) => {
                let count = flat.len();
                let thread = thread_comments(flat);
                self.state.write().await.store.set_comments(post_id, thread);
                Ok(count)
            }
            Err(e) => {
                self.record_error(&e).await;
                Err(e)
            }
        }
    }

    pub async fn add_comment(
        &self,
        post_id: i64,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<(), ClientError> {
        let request = NewComment {
            content: content.trim().to_string(),
            parent_id,
        };
        match self.api.add_comment(post_id, &request).await {
            Ok(Some(comment)) => {
                self.state.write().await.store.add_comment(post_id, comment);
                Ok(())
            }
            // Server did not echo the comment; refetch the thread
            Ok(None) => self.load_comments(post_id).await.map(|_| ()),
            Err(e) => {
                self.record_error(&e).await;
                Err(e)
            }
        }
    }

    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), ClientError> {
        match self.api.delete_comment(comment_id).await {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .store
                    .remove_comment(post_id, comment_id);
                Ok(())
            }
            Err(e) => {
                self.record_error(&e).await;
                Err(e)
            }
        }
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<Option<Post>, ClientError> {
        validate_new_post(&post.caption, &post.files)?;
        match self.api.create_post(post).await {
            Ok(Some(created)) => {
                let author = created
                    .user
                    .as_ref()
                    .map(|u| u.id)
                    .or_else(|| self.api.session().user_id());
                let mut state = self.state.write().await;
                let own_profile = author.is_some() && state.profile_user == author;
                state.store.insert_created(created.clone(), own_profile);
                Ok(Some(created))
            }
            // Not echoed back; show it after the next feed reload
            Ok(None) => Ok(None),
            Err(e) => {
                self.record_error(&e).await;
                Err(e)
            }
        }
    }

    pub async fn edit_post(&self, post_id: i64, request: &UpdatePostRequest) -> Result<(), ClientError> {
        if request.caption.trim().is_empty() {
            return Err(ClientError::Validation("Caption wajib diisi".to_string()));
        }
        match self.api.update_post(post_id, request).await {
            Ok(updated) => {
                let mut state = self.state.write().await;
                let post = match updated {
                    Some(post) => Some(post),
                    None => state.store.get(post_id).cloned().map(|mut post| {
                        post.caption = request.caption.clone();
                        post.kategori = request.kategori.clone();
                        post.tags = request.tags.clone();
                        post
                    }),
                };
                if let Some(post) = post {
                    state.store.replace(post);
                }
                Ok(())
            }
            Err(e) => {
                self.record_error(&e).await;
                Err(e)
            }
        }
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<(), ClientError> {
        match self.api.delete_post(post_id).await {
            Ok(()) => {
                self.state.write().await.store.remove(post_id);
                Ok(())
            }
            Err(e) => {
                self.record_error(&e).await;
                Err(e)
            }
        }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.api.categories().await
    }

    pub async fn user_stats(&self, user_id: i64) -> Result<UserStats, ClientError> {
        self.api.user_stats(user_id).await
    }
}
