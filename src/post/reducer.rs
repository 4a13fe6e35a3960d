use crate::mvi::Reducer;

use super::intent::PostViewIntent;
use super::state::PostViewState;

pub struct PostViewReducer;

impl Reducer for PostViewReducer {
    type State = PostViewState;
    type Intent = PostViewIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PostViewIntent::Loaded(post) => {
                state.post = post;
                state.is_loading = false;
            }
            PostViewIntent::LoadFailed(message) => {
                state.is_loading = false;
                state.error = Some(message);
            }
            PostViewIntent::DeleteStarted => {
                state.is_deleting = true;
                state.error = None;
            }
            PostViewIntent::Deleted => {
                state.is_deleting = false;
                state.deleted = true;
            }
            PostViewIntent::DeleteFailed(message) => {
                state.is_deleting = false;
                state.error = Some(message);
            }
        }
        state
    }
}
