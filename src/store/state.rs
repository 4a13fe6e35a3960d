//! Global state tree.

use crate::api::User;
use crate::mvi::UiState;

/// Login session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(User),
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::LoggedIn(user) => Some(user),
            Self::LoggedOut => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.user().map(|user| user.token.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.user().map(|user| user.username.as_str())
    }
}

impl From<Option<User>> for Session {
    fn from(user: Option<User>) -> Self {
        user.map_or(Session::LoggedOut, Session::LoggedIn)
    }
}

/// Process-wide state read by every feature.
///
/// Invariant: `unread_chat_count` is non-zero only while `is_chat_open` is false.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobalState {
    pub session: Session,
    /// Append-only; the renderer dismisses them on its own timer.
    pub flash_messages: Vec<String>,
    pub is_search_open: bool,
    pub is_chat_open: bool,
    pub unread_chat_count: u32,
}

impl UiState for GlobalState {}

impl GlobalState {
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn logged_in(&self) -> bool {
        self.session.is_logged_in()
    }
}
