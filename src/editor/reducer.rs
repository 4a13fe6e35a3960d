use crate::mvi::Reducer;

use super::intent::EditorIntent;
use super::state::{EditorState, BODY_REQUIRED, TITLE_REQUIRED};

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Intent = EditorIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EditorIntent::FetchComplete { title, body } => {
                state.title.value = title;
                state.body.value = body;
                state.is_fetching = false;
            }
            EditorIntent::NotFound => {
                state.is_fetching = false;
                state.not_found = true;
            }
            EditorIntent::FetchFailed(message) => {
                state.is_fetching = false;
                state.error = Some(message);
            }
            EditorIntent::TitleChanged(value) => {
                state.title.has_errors = false;
                state.title.value = value;
            }
            EditorIntent::BodyChanged(value) => {
                state.body.has_errors = false;
                state.body.value = value;
            }
            EditorIntent::TitleRules => state.title.require(TITLE_REQUIRED),
            EditorIntent::BodyRules => state.body.require(BODY_REQUIRED),
            EditorIntent::SubmitRequested => {
                if !state.has_errors() {
                    state.send_count.bump();
                }
            }
            EditorIntent::SaveStarted => {
                state.saves_in_flight = state.saves_in_flight.saturating_add(1);
                state.error = None;
            }
            EditorIntent::SaveFinished => {
                state.saves_in_flight = state.saves_in_flight.saturating_sub(1);
            }
            EditorIntent::SaveFailed(message) => {
                state.saves_in_flight = state.saves_in_flight.saturating_sub(1);
                state.error = Some(message);
            }
        }
        state
    }
}
