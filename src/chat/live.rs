use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::watch;

use crate::lifecycle::Scope;
use crate::mvi::LocalStore;
use crate::store::{Action, Store};

use super::channel::{Channel, ChannelError};
use super::intent::ChatIntent;
use super::reducer::ChatReducer;
use super::state::{ChatMessage, ChatState};

pub const CHAT_FROM_SERVER: &str = "chatFromServer";
pub const CHAT_FROM_BROWSER: &str = "chatFromBrowser";

/// Chat for one logged-in session.
///
/// Every inbound message is appended to the log; while the panel is closed it
/// also bumps the global unread counter once.
pub struct LiveChat {
    channel: Arc<dyn Channel>,
    store: Store,
    state: Arc<LocalStore<ChatReducer>>,
    scope: Scope,
}

impl LiveChat {
    pub fn attach(channel: Arc<dyn Channel>, store: Store) -> Self {
        let state = Arc::new(LocalStore::<ChatReducer>::default());
        let scope = Scope::new("chat");

        let inbox = Arc::clone(&state);
        let unread = store.clone();
        scope.add(channel.on(
            CHAT_FROM_SERVER,
            Arc::new(move |payload: Value| match serde_json::from_value::<ChatMessage>(payload) {
                Ok(message) => {
                    // Counted against the panel state at arrival.
                    let was_open = unread.state().is_chat_open;
                    inbox.dispatch(ChatIntent::Received(message));
                    if !was_open {
                        unread.dispatch(Action::IncrementUnread);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "ignoring malformed chat message"),
            }),
        ));

        Self {
            channel,
            store,
            state,
            scope,
        }
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        self.state.dispatch(ChatIntent::DraftChanged(draft.into()));
    }

    /// Publish the current draft and echo it locally.
    ///
    /// Returns `Ok(false)` when there was nothing to send.
    pub fn send(&self) -> Result<bool, ChannelError> {
        let draft = self.state.read(|s| s.draft.trim().to_owned());
        if draft.is_empty() {
            return Ok(false);
        }
        let state = self.store.state();
        let Some(user) = state.session.user() else {
            return Err(ChannelError::LoggedOut);
        };

        self.channel.emit(
            CHAT_FROM_BROWSER,
            json!({ "message": draft, "token": user.token }),
        )?;
        self.state.dispatch(ChatIntent::Sent(ChatMessage {
            author: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
            text: draft,
        }));
        Ok(true)
    }

    /// Open or close the panel; opening clears the unread counter.
    pub fn toggle(&self) {
        self.store.dispatch(Action::ToggleChat);
    }

    pub fn close(&self) {
        self.store.dispatch(Action::CloseChat);
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.read(|s| s.messages.clone())
    }

    pub fn state(&self) -> ChatState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    /// Stop listening and close the channel.
    pub fn disconnect(&self) {
        self.scope.close();
        self.channel.disconnect();
    }
}

impl Drop for LiveChat {
    fn drop(&mut self) {
        self.disconnect();
    }
}
