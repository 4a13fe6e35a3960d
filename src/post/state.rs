use crate::api::Post;
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq)]
pub struct PostViewState {
    pub post: Option<Post>,
    pub is_loading: bool,
    pub is_deleting: bool,
    /// Set once the backend confirmed the deletion; the page should navigate away.
    pub deleted: bool,
    pub error: Option<String>,
}

impl Default for PostViewState {
    fn default() -> Self {
        Self {
            post: None,
            is_loading: true,
            is_deleting: false,
            deleted: false,
            error: None,
        }
    }
}

impl UiState for PostViewState {}

impl PostViewState {
    /// Loading finished without a post.
    pub fn not_found(&self) -> bool {
        !self.is_loading && self.post.is_none() && self.error.is_none()
    }

    pub fn is_owned_by(&self, username: Option<&str>) -> bool {
        match (&self.post, username) {
            (Some(post), Some(username)) => post.author.username == username,
            _ => false,
        }
    }
}
