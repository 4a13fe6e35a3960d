use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::auth;
use crate::context::Context;
use crate::lifecycle::{self, RequestHandle};
use crate::mvi::LocalStore;
use crate::store::{flash, Action};

use super::intent::EditorIntent;
use super::reducer::EditorReducer;
use super::state::EditorState;

const LOGIN_REQUIRED: &str = "You must be logged in to edit posts.";

/// Edit form for one post.
///
/// The post is fetched on mount. Each accepted submit issues exactly one save;
/// saves are not coalesced, so two quick submits send two requests. Dropping
/// the editor cancels the fetch and every pending save.
pub struct PostEditor {
    ctx: Context,
    post_id: String,
    state: Arc<LocalStore<EditorReducer>>,
    fetch: Mutex<Option<RequestHandle>>,
    saves: Mutex<Vec<RequestHandle>>,
}

impl PostEditor {
    pub fn mount(ctx: &Context, post_id: impl Into<String>) -> Self {
        let post_id = post_id.into();
        let state = Arc::new(LocalStore::<EditorReducer>::default());

        let api = ctx.api.clone();
        let id = post_id.clone();
        let target = Arc::clone(&state);
        let fetch = lifecycle::begin(
            "fetch-post",
            async move { api.fetch_post(&id).await },
            move |result| match result {
                Ok(Some(post)) => target.dispatch(EditorIntent::FetchComplete {
                    title: post.title,
                    body: post.body,
                }),
                Ok(None) => target.dispatch(EditorIntent::NotFound),
                Err(err) => target.dispatch(EditorIntent::FetchFailed(err.user_message().into())),
            },
        );

        Self {
            ctx: ctx.clone(),
            post_id,
            state,
            fetch: Mutex::new(Some(fetch)),
            saves: Mutex::new(Vec::new()),
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn set_title(&self, value: impl Into<String>) {
        self.state.dispatch(EditorIntent::TitleChanged(value.into()));
    }

    pub fn set_body(&self, value: impl Into<String>) {
        self.state.dispatch(EditorIntent::BodyChanged(value.into()));
    }

    pub fn blur_title(&self) {
        self.state.dispatch(EditorIntent::TitleRules);
    }

    pub fn blur_body(&self) {
        self.state.dispatch(EditorIntent::BodyRules);
    }

    /// Validate both fields and save if they pass. Returns true if a save was issued.
    pub fn submit(&self) -> bool {
        let before = self.state.read(|s| s.send_count);
        self.state.dispatch(EditorIntent::TitleRules);
        self.state.dispatch(EditorIntent::BodyRules);
        self.state.dispatch(EditorIntent::SubmitRequested);
        if self.state.read(|s| s.send_count) == before {
            tracing::debug!(post = %self.post_id, "submit blocked by validation");
            return false;
        }
        self.save();
        true
    }

    fn save(&self) {
        let Some(token) = self.ctx.token() else {
            self.state
                .dispatch(EditorIntent::SaveFailed(LOGIN_REQUIRED.into()));
            return;
        };
        let (title, body) = self
            .state
            .read(|s| (s.title.value.clone(), s.body.value.clone()));
        self.state.dispatch(EditorIntent::SaveStarted);

        let api = self.ctx.api.clone();
        let id = self.post_id.clone();
        let store = self.ctx.store.clone();
        let target = Arc::clone(&self.state);
        let handle = lifecycle::begin(
            "save-post",
            async move { api.save_post(&id, &title, &body, &token).await },
            move |result| match result {
                Ok(()) => {
                    target.dispatch(EditorIntent::SaveFinished);
                    store.dispatch(Action::flash(flash::POST_UPDATED));
                }
                Err(err) => {
                    target.dispatch(EditorIntent::SaveFailed(err.user_message().into()));
                    if err.is_auth_expired() {
                        auth::expire_session(&store);
                    }
                }
            },
        );

        let mut saves = self.saves.lock();
        saves.retain(|save| !save.status().is_settled());
        saves.push(handle);
    }

    pub fn state(&self) -> EditorState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<EditorState> {
        self.state.subscribe()
    }
}

impl Drop for PostEditor {
    fn drop(&mut self) {
        let fetch = self.fetch.lock().take();
        drop(fetch);
        let saves = std::mem::take(&mut *self.saves.lock());
        drop(saves);
    }
}
