use serde::{Deserialize, Serialize};

use crate::mvi::UiState;

/// One line in the chat log, as broadcast by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "username")]
    pub author: String,
    #[serde(rename = "avatar", default)]
    pub avatar_url: String,
    #[serde(rename = "message")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatState {
    pub draft: String,
    /// Arrival order, local echoes included.
    pub messages: Vec<ChatMessage>,
}

impl UiState for ChatState {}
