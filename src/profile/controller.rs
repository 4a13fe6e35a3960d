use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::ApiError;
use crate::auth;
use crate::context::Context;
use crate::lifecycle::{self, RequestHandle, Scope};
use crate::mvi::{LocalStore, SubmitCounter};
use crate::store::Store;

use super::intent::ProfileIntent;
use super::reducer::ProfileReducer;
use super::state::ProfileState;

/// Profile page for one user: header data, post list and follow toggle.
///
/// Dropping the view cancels its fetches and any pending follow request; a
/// cancelled follow request never touches local or global state.
pub struct ProfileView {
    ctx: Context,
    username: String,
    state: Arc<LocalStore<ProfileReducer>>,
    follow: Mutex<Option<RequestHandle>>,
    scope: Scope,
}

impl ProfileView {
    pub fn mount(ctx: &Context, username: impl Into<String>) -> Self {
        let username = username.into();
        let state = Arc::new(LocalStore::<ProfileReducer>::default());
        let scope = Scope::new("profile");

        let api = ctx.api.clone();
        let name = username.clone();
        let token = ctx.token();
        let target = Arc::clone(&state);
        scope.add(
            lifecycle::begin(
                "fetch-profile",
                async move { api.fetch_profile(&name, token.as_deref()).await },
                move |result| match result {
                    Ok(profile) => target.dispatch(ProfileIntent::ProfileLoaded(profile)),
                    Err(err) => target.dispatch(ProfileIntent::ProfileFailed(err.user_message().into())),
                },
            )
            .into_disposer(),
        );

        let api = ctx.api.clone();
        let name = username.clone();
        let target = Arc::clone(&state);
        scope.add(
            lifecycle::begin(
                "profile-posts",
                async move { api.profile_posts(&name).await },
                move |result| match result {
                    Ok(posts) => target.dispatch(ProfileIntent::PostsLoaded(posts)),
                    Err(err) => target.dispatch(ProfileIntent::PostsFailed(err.user_message().into())),
                },
            )
            .into_disposer(),
        );

        Self {
            ctx: ctx.clone(),
            username,
            state,
            follow: Mutex::new(None),
            scope,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn can_follow(&self) -> bool {
        let viewer = self.ctx.username();
        self.state.read(|s| s.can_follow(viewer.as_deref()))
    }

    pub fn can_unfollow(&self) -> bool {
        let viewer = self.ctx.username();
        self.state.read(|s| s.can_unfollow(viewer.as_deref()))
    }

    /// Returns true if a follow request was issued.
    pub fn start_following(&self) -> bool {
        if !self.can_follow() {
            return false;
        }
        self.toggle(
            ProfileIntent::StartFollowing,
            |s| s.start_following_count,
            true,
        )
    }

    /// Returns true if an unfollow request was issued.
    pub fn stop_following(&self) -> bool {
        if !self.can_unfollow() {
            return false;
        }
        self.toggle(
            ProfileIntent::StopFollowing,
            |s| s.stop_following_count,
            false,
        )
    }

    fn toggle(
        &self,
        intent: ProfileIntent,
        counter: fn(&ProfileState) -> SubmitCounter,
        following: bool,
    ) -> bool {
        let Some(token) = self.ctx.token() else {
            return false;
        };
        let before = self.state.read(counter);
        self.state.dispatch(intent);
        if self.state.read(counter) == before {
            return false;
        }

        let api = self.ctx.api.clone();
        let target = self.state.read(|s| s.profile.profile_username.clone());
        let handle = lifecycle::begin(
            if following { "follow" } else { "unfollow" },
            async move {
                if following {
                    api.follow(&target, &token).await
                } else {
                    api.unfollow(&target, &token).await
                }
            },
            settle_follow(Arc::clone(&self.state), self.ctx.store.clone(), following),
        );
        let previous = self.follow.lock().replace(handle);
        drop(previous);
        true
    }

    pub fn state(&self) -> ProfileState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }
}

fn settle_follow(
    state: Arc<LocalStore<ProfileReducer>>,
    store: Store,
    following: bool,
) -> impl FnOnce(Result<(), ApiError>) + Send + 'static {
    move |result| match result {
        Ok(()) => state.dispatch(ProfileIntent::FollowSettled),
        Err(err) => {
            state.dispatch(ProfileIntent::FollowFailed {
                following,
                message: err.user_message().into(),
            });
            if err.is_auth_expired() {
                auth::expire_session(&store);
            }
        }
    }
}

impl Drop for ProfileView {
    fn drop(&mut self) {
        let follow = self.follow.lock().take();
        drop(follow);
        self.scope.close();
    }
}
