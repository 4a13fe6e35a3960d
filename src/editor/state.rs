use crate::mvi::{SubmitCounter, UiState};

pub const TITLE_REQUIRED: &str = "You must provide a title";
pub const BODY_REQUIRED: &str = "You must provide body content";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field {
    pub value: String,
    pub has_errors: bool,
    pub message: String,
}

impl Field {
    pub(super) fn require(&mut self, message: &str) {
        if self.value.trim().is_empty() {
            self.has_errors = true;
            self.message = message.to_owned();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub title: Field,
    pub body: Field,
    pub is_fetching: bool,
    /// Saves currently in flight. Overlapping submits are not coalesced.
    pub saves_in_flight: u32,
    pub send_count: SubmitCounter,
    pub not_found: bool,
    pub error: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            title: Field::default(),
            body: Field::default(),
            is_fetching: true,
            saves_in_flight: 0,
            send_count: SubmitCounter::default(),
            not_found: false,
            error: None,
        }
    }
}

impl UiState for EditorState {}

impl EditorState {
    pub fn is_saving(&self) -> bool {
        self.saves_in_flight > 0
    }

    pub fn has_errors(&self) -> bool {
        self.title.has_errors || self.body.has_errors
    }
}
