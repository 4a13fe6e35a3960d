use crate::api::Post;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum PostViewIntent {
    Loaded(Option<Post>),
    LoadFailed(String),
    DeleteStarted,
    Deleted,
    DeleteFailed(String),
}

impl Intent for PostViewIntent {}
