//! Payloads exchanged with the backend.

use serde::{Deserialize, Serialize};

/// Logged-in user as returned by `/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Not every backend response carries an id; restored sessions never do.
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(rename = "avatar")]
    pub avatar_url: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    #[serde(rename = "avatar")]
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "createdDate", default)]
    pub created_date: String,
    pub author: Author,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCounts {
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub following_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub profile_username: String,
    pub profile_avatar: String,
    #[serde(default)]
    pub is_following: bool,
    #[serde(default)]
    pub counts: ProfileCounts,
}

/// Username shown while the profile has not loaded yet.
pub const PLACEHOLDER_USERNAME: &str = "...";

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            profile_username: PLACEHOLDER_USERNAME.to_string(),
            profile_avatar: "https://gravatar.com/avatar/placeholder?s=128".to_string(),
            is_following: false,
            counts: ProfileCounts::default(),
        }
    }
}

impl ProfileData {
    pub fn is_placeholder(&self) -> bool {
        self.profile_username == PLACEHOLDER_USERNAME
    }
}
