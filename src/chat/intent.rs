use crate::mvi::Intent;

use super::state::ChatMessage;

#[derive(Debug, Clone)]
pub enum ChatIntent {
    DraftChanged(String),
    /// Inbound message from the channel.
    Received(ChatMessage),
    /// Local echo of a message we just sent; also clears the draft.
    Sent(ChatMessage),
}

impl Intent for ChatIntent {}
