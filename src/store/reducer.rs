//! Reducer for the global state tree.

use crate::mvi::Reducer;

use super::action::Action;
use super::state::{GlobalState, Session};

pub struct AppReducer;

impl Reducer for AppReducer {
    type State = GlobalState;
    type Intent = Action;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            Action::Login(user) => GlobalState {
                session: Session::LoggedIn(user),
                ..state
            },
            // Chat belongs to the session; nothing about it survives logout.
            Action::Logout => GlobalState {
                session: Session::LoggedOut,
                is_chat_open: false,
                unread_chat_count: 0,
                ..state
            },
            Action::FlashMessage(text) => {
                let mut state = state;
                state.flash_messages.push(text);
                state
            }
            Action::OpenSearch => GlobalState {
                is_search_open: true,
                ..state
            },
            Action::CloseSearch => GlobalState {
                is_search_open: false,
                ..state
            },
            Action::ToggleChat => {
                let open = !state.is_chat_open;
                GlobalState {
                    is_chat_open: open,
                    unread_chat_count: if open { 0 } else { state.unread_chat_count },
                    ..state
                }
            }
            Action::CloseChat => GlobalState {
                is_chat_open: false,
                ..state
            },
            Action::IncrementUnread if state.is_chat_open => state,
            Action::IncrementUnread => GlobalState {
                unread_chat_count: state.unread_chat_count.saturating_add(1),
                ..state
            },
            Action::ClearUnread => GlobalState {
                unread_chat_count: 0,
                ..state
            },
            Action::Unknown => state,
        }
    }
}
