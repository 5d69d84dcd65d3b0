//! Normalized store for documentation posts.
//!
//! Each post is held once, keyed by id. The feed, trending, profile and search
//! lists only hold ids, so a like, comment, edit or delete is visible in every
//! list that shows the post.

use std::collections::HashMap;

use crate::models::{count_comments, insert_comment, remove_comment, Comment, Post};
use crate::pagination::{
    PageApply, PageTicket, PagedList, FEED_PAGE_SIZE, PROFILE_PAGE_SIZE, SEARCH_PAGE_SIZE,
};

/// Lists that project posts out of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedView {
    Feed,
    Trending,
    Profile,
    Search,
}

impl FeedView {
    pub const ALL: [FeedView; 4] = [
        FeedView::Feed,
        FeedView::Trending,
        FeedView::Profile,
        FeedView::Search,
    ];

    pub fn page_size(&self) -> u32 {
        match self {
            FeedView::Feed => FEED_PAGE_SIZE,
            FeedView::Trending => FEED_PAGE_SIZE,
            FeedView::Profile => PROFILE_PAGE_SIZE,
            FeedView::Search => SEARCH_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostStore {
    posts: HashMap<i64, Post>,
    views: HashMap<FeedView, PagedList<i64>>,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    pub fn new() -> Self {
        let views = FeedView::ALL
            .iter()
            .map(|v| (*v, PagedList::new(v.page_size())))
            .collect();
        Self {
            posts: HashMap::new(),
            views,
        }
    }

    pub fn get(&self, id: i64) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn list(&self, view: FeedView) -> &PagedList<i64> {
        &self.views[&view]
    }

    fn list_mut(&mut self, view: FeedView) -> &mut PagedList<i64> {
        self.views
            .entry(view)
            .or_insert_with(|| PagedList::new(view.page_size()))
    }

    /// Posts of one list, in list order.
    pub fn view(&self, view: FeedView) -> Vec<&Post> {
        self.list(view)
            .items()
            .iter()
            .filter_map(|id| self.posts.get(id))
            .collect()
    }

    pub fn has_more(&self, view: FeedView) -> bool {
        self.list(view).has_more()
    }

    pub fn is_loading(&self, view: FeedView) -> bool {
        self.list(view).is_loading()
    }

    pub fn loaded_page(&self, view: FeedView) -> u32 {
        self.list(view).loaded_page()
    }

    /// Views whose list currently contains the post.
    pub fn views_containing(&self, id: i64) -> Vec<FeedView> {
        FeedView::ALL
            .iter()
            .copied()
            .filter(|v| self.list(*v).contains(id))
            .collect()
    }

    pub fn begin(&mut self, view: FeedView, page: u32) -> PageTicket {
        self.list_mut(view).begin(page)
    }

    pub fn begin_next(&mut self, view: FeedView) -> Option<PageTicket> {
        self.list_mut(view).begin_next()
    }

    pub fn is_current(&self, view: FeedView, ticket: PageTicket) -> bool {
        self.list(view).is_current(ticket)
    }

    pub fn fail(&mut self, view: FeedView, ticket: PageTicket) {
        self.list_mut(view).fail(ticket);
    }

    /// Clear one list, e.g. when its filter changes.
    pub fn reset(&mut self, view: FeedView) {
        self.list_mut(view).reset();
        self.prune();
    }

    /// Store a page of posts and project it into `view`.
    pub fn ingest(
        &mut self,
        view: FeedView,
        ticket: PageTicket,
        posts: Vec<Post>,
        has_more: bool,
    ) -> PageApply {
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let applied = self.list_mut(view).apply(ticket, ids, has_more);
        if applied == PageApply::Stale {
            return applied;
        }
        for post in posts {
            self.upsert(post);
        }
        if matches!(applied, PageApply::Replaced { .. }) {
            self.prune();
        }
        applied
    }

    /// Insert or refresh a post, keeping an already loaded comment thread.
    pub fn upsert(&mut self, mut post: Post) {
        if post.comments.is_none() {
            if let Some(existing) = self.posts.get_mut(&post.id) {
                post.comments = existing.comments.take();
            }
        }
        self.posts.insert(post.id, post);
    }

    /// A post the current user just created goes first in the feed. It joins
    /// the profile list only when that list shows the author's own posts.
    pub fn insert_created(&mut self, post: Post, own_profile_loaded: bool) {
        let id = post.id;
        self.upsert(post);
        self.list_mut(FeedView::Feed).prepend(id);
        if own_profile_loaded && self.list(FeedView::Profile).loaded_page() > 0 {
            self.list_mut(FeedView::Profile).prepend(id);
        }
    }

    /// Replace a post after an edit.
    pub fn replace(&mut self, post: Post) -> bool {
        if !self.posts.contains_key(&post.id) {
            return false;
        }
        self.upsert(post);
        true
    }

    /// Remove a post from the store and every list.
    pub fn remove(&mut self, id: i64) -> Option<Post> {
        for list in self.views.values_mut() {
            list.remove(id);
        }
        self.posts.remove(&id)
    }

    /// Optimistic like toggle. Returns the new `(is_liked, like_count)`.
    pub fn toggle_like(&mut self, id: i64) -> Option<(bool, u64)> {
        let post = self.posts.get_mut(&id)?;
        post.toggle_like();
        Some((post.is_liked, post.like_count))
    }

    /// Overwrite the like state with the server's answer.
    pub fn apply_like(&mut self, id: i64, is_liked: bool, like_count: u64) -> bool {
        match self.posts.get_mut(&id) {
            Some(post) => {
                post.is_liked = is_liked;
                post.like_count = like_count;
                true
            }
            None => false,
        }
    }

    pub fn set_comments(&mut self, id: i64, comments: Vec<Comment>) -> bool {
        match self.posts.get_mut(&id) {
            Some(post) => {
                post.comment_count = count_comments(&comments) as u64;
                post.comments = Some(comments);
                true
            }
            None => false,
        }
    }

    /// Count a new comment and, when the thread is loaded, place it there.
    pub fn add_comment(&mut self, id: i64, comment: Comment) -> bool {
        let Some(post) = self.posts.get_mut(&id) else {
            return false;
        };
        post.comment_count += 1;
        if let Some(thread) = post.comments.as_mut() {
            if !insert_comment(thread, comment.clone()) {
                // Parent not loaded; show it at the top level
                let mut orphan = comment;
                orphan.parent_id = None;
                thread.push(orphan);
            }
        }
        true
    }

    /// Remove a comment and its replies from the loaded thread.
    pub fn remove_comment(&mut self, id: i64, comment_id: i64) -> usize {
        let Some(post) = self.posts.get_mut(&id) else {
            return 0;
        };
        let removed = match post.comments.as_mut() {
            Some(thread) => remove_comment(thread, comment_id),
            None => 1,
        };
        post.comment_count = post.comment_count.saturating_sub(removed as u64);
        removed
    }

    /// Drop posts no list refers to any more.
    fn prune(&mut self) {
        let views = &self.views;
        self.posts
            .retain(|id, _| views.values().any(|list| list.contains(*id)));
    }
}
