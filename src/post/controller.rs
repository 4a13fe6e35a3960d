use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::auth;
use crate::context::Context;
use crate::lifecycle::{self, RequestHandle};
use crate::mvi::LocalStore;
use crate::store::{flash, Action};

use super::intent::PostViewIntent;
use super::reducer::PostViewReducer;
use super::state::PostViewState;

const DELETE_REJECTED: &str = "The post could not be deleted.";

/// Read-only page for a single post, with delete for its author.
pub struct PostView {
    ctx: Context,
    post_id: String,
    state: Arc<LocalStore<PostViewReducer>>,
    fetch: Mutex<Option<RequestHandle>>,
    delete: Mutex<Option<RequestHandle>>,
}

impl PostView {
    pub fn mount(ctx: &Context, post_id: impl Into<String>) -> Self {
        let post_id = post_id.into();
        let state = Arc::new(LocalStore::<PostViewReducer>::default());

        let api = ctx.api.clone();
        let id = post_id.clone();
        let target = Arc::clone(&state);
        let fetch = lifecycle::begin(
            "view-post",
            async move { api.fetch_post(&id).await },
            move |result| match result {
                Ok(post) => target.dispatch(PostViewIntent::Loaded(post)),
                Err(err) => target.dispatch(PostViewIntent::LoadFailed(err.user_message().into())),
            },
        );

        Self {
            ctx: ctx.clone(),
            post_id,
            state,
            fetch: Mutex::new(Some(fetch)),
            delete: Mutex::new(None),
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn is_owner(&self) -> bool {
        let viewer = self.ctx.username();
        self.state.read(|s| s.is_owned_by(viewer.as_deref()))
    }

    /// Delete the post. Only its author may; returns true if a request was issued.
    pub fn delete(&self) -> bool {
        if !self.is_owner() || self.state.read(|s| s.is_deleting) {
            return false;
        }
        let Some(token) = self.ctx.token() else {
            return false;
        };
        self.state.dispatch(PostViewIntent::DeleteStarted);

        let api = self.ctx.api.clone();
        let id = self.post_id.clone();
        let store = self.ctx.store.clone();
        let target = Arc::clone(&self.state);
        let handle = lifecycle::begin(
            "delete-post",
            async move { api.delete_post(&id, &token).await },
            move |result| match result {
                Ok(true) => {
                    target.dispatch(PostViewIntent::Deleted);
                    store.dispatch(Action::flash(flash::POST_DELETED));
                }
                Ok(false) => target.dispatch(PostViewIntent::DeleteFailed(DELETE_REJECTED.into())),
                Err(err) => {
                    target.dispatch(PostViewIntent::DeleteFailed(err.user_message().into()));
                    if err.is_auth_expired() {
                        auth::expire_session(&store);
                    }
                }
            },
        );
        let previous = self.delete.lock().replace(handle);
        drop(previous);
        true
    }

    pub fn state(&self) -> PostViewState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<PostViewState> {
        self.state.subscribe()
    }
}

impl Drop for PostView {
    fn drop(&mut self) {
        let fetch = self.fetch.lock().take();
        drop(fetch);
        let delete = self.delete.lock().take();
        drop(delete);
    }
}
