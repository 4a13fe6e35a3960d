use crate::api::Post;
use crate::mvi::{SubmitCounter, UiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Waiting for typing to settle or for the query to answer.
    Loading,
    Results,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub term: String,
    pub results: Vec<Post>,
    pub phase: SearchPhase,
    /// Bumped once per settled term; each bump issues one query.
    pub request_count: SubmitCounter,
    pub error: Option<String>,
}

impl UiState for SearchState {}

