use crate::api::Post;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SearchIntent {
    /// Keystroke: the raw field value.
    TermChanged(String),
    /// The debounce timer fired for this term.
    Settled(String),
    ResultsArrived(Vec<Post>),
    QueryFailed(String),
}

impl Intent for SearchIntent {}
