use crate::mvi::Reducer;

use super::intent::ProfileIntent;
use super::state::ProfileState;

pub struct ProfileReducer;

fn apply_follow(state: &mut ProfileState, following: bool) {
    let counts = &mut state.profile.counts;
    counts.follower_count = if following {
        counts.follower_count.saturating_add(1)
    } else {
        counts.follower_count.saturating_sub(1)
    };
    state.profile.is_following = following;
}

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Intent = ProfileIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ProfileIntent::ProfileLoaded(profile) => {
                state.profile = profile;
                state.error = None;
            }
            ProfileIntent::ProfileFailed(message) => state.error = Some(message),
            ProfileIntent::PostsLoaded(posts) => {
                state.posts = posts;
                state.is_loading_posts = false;
            }
            ProfileIntent::PostsFailed(message) => {
                state.is_loading_posts = false;
                state.error = Some(message);
            }
            ProfileIntent::StartFollowing => {
                if state.follow_action_loading || state.profile.is_following {
                    return state;
                }
                state.start_following_count.bump();
                state.follow_action_loading = true;
                state.error = None;
                apply_follow(&mut state, true);
            }
            ProfileIntent::StopFollowing => {
                if state.follow_action_loading || !state.profile.is_following {
                    return state;
                }
                state.stop_following_count.bump();
                state.follow_action_loading = true;
                state.error = None;
                apply_follow(&mut state, false);
            }
            ProfileIntent::FollowSettled => state.follow_action_loading = false,
            ProfileIntent::FollowFailed { following, message } => {
                state.follow_action_loading = false;
                if state.profile.is_following == following {
                    apply_follow(&mut state, !following);
                }
                state.error = Some(message);
            }
        }
        state
    }
}
