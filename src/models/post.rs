//! Documentation feed posts and their threaded comments.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MediaFile, User};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub kategori: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub files: Vec<MediaFile>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, alias = "likes_count")]
    pub like_count: u64,
    #[serde(default, alias = "comments_count")]
    pub comment_count: u64,
    #[serde(default)]
    pub is_liked: bool,
    /// Loaded lazily; `None` until the comment thread has been fetched
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Flip the like flag and adjust the count by one.
    pub fn toggle_like(&mut self) {
        if self.is_liked {
            self.is_liked = false;
            self.like_count = self.like_count.saturating_sub(1);
        } else {
            self.is_liked = true;
            self.like_count += 1;
        }
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user.as_ref().map(|u| u.id) == Some(user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub user: Option<User>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// Build a reply tree from a flat comment list.
///
/// Comments whose parent is missing are kept at the top level. Input order is
/// preserved among siblings.
pub fn thread_comments(flat: Vec<Comment>) -> Vec<Comment> {
    let known: std::collections::HashSet<i64> = flat.iter().map(|c| c.id).collect();
    let mut children: HashMap<i64, Vec<Comment>> = HashMap::new();
    let mut roots = Vec::new();

    for comment in flat {
        match comment.parent_id {
            Some(parent) if parent != comment.id && known.contains(&parent) => {
                children.entry(parent).or_default().push(comment)
            }
            _ => roots.push(comment),
        }
    }

    fn attach(comment: &mut Comment, children: &mut HashMap<i64, Vec<Comment>>) {
        if let Some(mut replies) = children.remove(&comment.id) {
            for reply in replies.iter_mut() {
                attach(reply, children);
            }
            comment.replies.extend(replies);
        }
    }

    for root in roots.iter_mut() {
        attach(root, &mut children);
    }
    roots
}

/// Insert a comment under its parent, or at the top level when it has none.
///
/// Returns false when the parent is not part of the tree.
pub fn insert_comment(tree: &mut Vec<Comment>, comment: Comment) -> bool {
    let Some(parent_id) = comment.parent_id else {
        tree.push(comment);
        return true;
    };

    fn find_parent(nodes: &mut [Comment], parent_id: i64) -> Option<&mut Comment> {
        for node in nodes.iter_mut() {
            if node.id == parent_id {
                return Some(node);
            }
            if let Some(found) = find_parent(&mut node.replies, parent_id) {
                return Some(found);
            }
        }
        None
    }

    match find_parent(tree, parent_id) {
        Some(parent) => {
            parent.replies.push(comment);
            true
        }
        None => false,
    }
}

/// Remove a comment and its replies. Returns how many comments were removed.
pub fn remove_comment(tree: &mut Vec<Comment>, comment_id: i64) -> usize {
    if let Some(pos) = tree.iter().position(|c| c.id == comment_id) {
        let removed = tree.remove(pos);
        return count_comments(std::slice::from_ref(&removed));
    }
    tree.iter_mut()
        .map(|c| remove_comment(&mut c.replies, comment_id))
        .find(|n| *n > 0)
        .unwrap_or(0)
}

pub fn count_comments(tree: &[Comment]) -> usize {
    tree.iter().map(|c| 1 + count_comments(&c.replies)).sum()
}

/// Body of `POST /dokumentasi/:id/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// Body of `PUT /dokumentasi/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Server answer to a like toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeState {
    pub is_liked: bool,
    #[serde(alias = "likes_count")]
    pub like_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub post_count: u64,
}

/// Per-user totals shown on the profile page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub total_comments: u64,
}
