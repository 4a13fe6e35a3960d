//! Typed access to the social posting backend.
//!
//! `HttpApi` is the transport seam; `Api` maps each backend route to a typed
//! call so features never build paths or decode JSON themselves.

mod error;
mod http;
mod models;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub use error::ApiError;
pub use http::{HttpApi, HttpClient, Method};
pub use models::{Author, Post, ProfileCounts, ProfileData, User, PLACEHOLDER_USERNAME};

/// Cheap-to-clone handle over a shared transport.
#[derive(Clone)]
pub struct Api {
    http: Arc<dyn HttpApi>,
}

impl Api {
    pub fn new(http: Arc<dyn HttpApi>) -> Self {
        Self { http }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let value = self.http.request(method, path, body).await?;
        decode(value)
    }

    /// `None` when the backend rejects the credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>, ApiError> {
        let value = self
            .http
            .request(
                Method::Post,
                "/login",
                Some(json!({ "username": username, "password": password })),
            )
            .await?;
        decode_optional(value)
    }

    /// Whether the backend still accepts `token`.
    pub async fn check_token(&self, token: &str) -> Result<bool, ApiError> {
        self.call(Method::Post, "/checkToken", Some(json!({ "token": token })))
            .await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Post>, ApiError> {
        self.call(Method::Post, "/search", Some(json!({ "searchTerm": term })))
            .await
    }

    /// `None` when no post has this id.
    pub async fn fetch_post(&self, id: &str) -> Result<Option<Post>, ApiError> {
        let value = self
            .http
            .request(Method::Get, &format!("/post/{id}"), None)
            .await?;
        decode_optional(value)
    }

    pub async fn save_post(
        &self,
        id: &str,
        title: &str,
        body: &str,
        token: &str,
    ) -> Result<(), ApiError> {
        self.http
            .request(
                Method::Post,
                &format!("/post/{id}/edit"),
                Some(json!({ "title": title, "body": body, "token": token })),
            )
            .await
            .map(|_| ())
    }

    /// True when the backend confirms the deletion.
    pub async fn delete_post(&self, id: &str, token: &str) -> Result<bool, ApiError> {
        let value = self
            .http
            .request(
                Method::Delete,
                &format!("/post/{id}"),
                Some(json!({ "token": token })),
            )
            .await?;
        Ok(value.as_str() == Some("Success"))
    }

    pub async fn fetch_profile(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<ProfileData, ApiError> {
        self.call(
            Method::Post,
            &format!("/profile/{username}"),
            Some(json!({ "token": token })),
        )
        .await
    }

    pub async fn profile_posts(&self, username: &str) -> Result<Vec<Post>, ApiError> {
        self.call(Method::Get, &format!("/profile/{username}/posts"), None)
            .await
    }

    pub async fn follow(&self, username: &str, token: &str) -> Result<(), ApiError> {
        self.http
            .request(
                Method::Post,
                &format!("/addFollow/{username}"),
                Some(json!({ "token": token })),
            )
            .await
            .map(|_| ())
    }

    pub async fn unfollow(&self, username: &str, token: &str) -> Result<(), ApiError> {
        self.http
            .request(
                Method::Post,
                &format!("/removeFollow/{username}"),
                Some(json!({ "token": token })),
            )
            .await
            .map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The backend answers `false` (or nothing) instead of a 404.
fn decode_optional<T: DeserializeOwned>(value: Value) -> Result<Option<T>, ApiError> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        other => decode(other).map(Some),
    }
}
