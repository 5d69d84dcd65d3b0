//! Feedback submitted by staff against a letter.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{MediaFile, User};

/// How long after creation a feedback entry may still be edited.
pub const FEEDBACK_EDIT_WINDOW_MINUTES: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub id: i64,
    pub surat_id: i64,
    #[serde(default, alias = "catatan")]
    pub notes: String,
    #[serde(default, alias = "files")]
    pub photos: Vec<MediaFile>,
    #[serde(default)]
    pub user: Option<User>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Feedback {
    pub fn edit_deadline(&self) -> DateTime<Utc> {
        self.created_at + Duration::minutes(FEEDBACK_EDIT_WINDOW_MINUTES)
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user.as_ref().map(|u| u.id) == Some(user_id)
    }
}
