use crate::mvi::Reducer;

use super::intent::ChatIntent;
use super::state::ChatState;

pub struct ChatReducer;

impl Reducer for ChatReducer {
    type State = ChatState;
    type Intent = ChatIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ChatIntent::DraftChanged(draft) => state.draft = draft,
            ChatIntent::Received(message) => state.messages.push(message),
            ChatIntent::Sent(message) => {
                state.messages.push(message);
                state.draft.clear();
            }
        }
        state
    }
}
