//! User model as returned by the Dispoma API.

use serde::{Deserialize, Serialize};

/// Role of a signed-in user; decides which letter endpoints apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Kepala,
    Sekretaris,
    Staff,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Kepala => "kepala",
            Role::Sekretaris => "sekretaris",
            Role::Staff => "staff",
            Role::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Kepala => "Kepala",
            Role::Sekretaris => "Sekretaris",
            Role::Staff => "Staf",
            Role::Unknown => "Tidak diketahui",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jabatan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Subordinates grouped by their bidang, in first-seen order.
pub fn group_by_bidang(users: &[User]) -> Vec<(String, Vec<&User>)> {
    let mut groups: Vec<(String, Vec<&User>)> = Vec::new();
    for user in users {
        let bidang = user.bidang.clone().unwrap_or_else(|| "Lainnya".to_string());
        match groups.iter_mut().find(|(name, _)| *name == bidang) {
            Some((_, members)) => members.push(user),
            None => groups.push((bidang, vec![user])),
        }
    }
    groups
}
