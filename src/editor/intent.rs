use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum EditorIntent {
    FetchComplete { title: String, body: String },
    NotFound,
    FetchFailed(String),
    TitleChanged(String),
    BodyChanged(String),
    /// Title field lost focus.
    TitleRules,
    /// Body field lost focus.
    BodyRules,
    /// Bumps the send counter unless a field has errors.
    SubmitRequested,
    SaveStarted,
    SaveFinished,
    SaveFailed(String),
}

impl Intent for EditorIntent {}
