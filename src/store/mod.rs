//! Global state container.
//!
//! One `Store` per process. All mutation goes through [`Store::dispatch`],
//! which applies [`AppReducer`] under a lock so actions never interleave, then
//! publishes the new snapshot to subscribers. Whenever the session changes the
//! durable session fields are mirrored exactly once, inside the same critical
//! section.

mod action;
pub mod flash;
mod reducer;
mod state;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

pub use action::Action;
pub use reducer::AppReducer;
pub use state::{GlobalState, Session};

use crate::mvi::Reducer;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    dispatch_lock: Mutex<()>,
    state: watch::Sender<Arc<GlobalState>>,
    sessions: SessionStore,
}

impl Store {
    /// Create a store whose session is restored from durable storage.
    pub fn new(sessions: SessionStore) -> Self {
        let session = Session::from(sessions.load());
        Self::with_state(GlobalState::with_session(session), sessions)
    }

    pub fn with_state(initial: GlobalState, sessions: SessionStore) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self {
            inner: Arc::new(StoreInner {
                dispatch_lock: Mutex::new(()),
                state,
                sessions,
            }),
        }
    }

    /// Apply `action` atomically relative to every other dispatch.
    pub fn dispatch(&self, action: Action) {
        let _guard = self.inner.dispatch_lock.lock();
        let previous = self.inner.state.borrow().clone();
        tracing::trace!(?action, "dispatch");
        let next = AppReducer::reduce(GlobalState::clone(&previous), action);

        if next.session != previous.session {
            if let Err(err) = self.inner.sessions.mirror(&next.session) {
                tracing::error!(error = %err, "failed to mirror session to storage");
            }
        }

        self.inner.state.send_replace(Arc::new(next));
    }

    /// Decode a tagged action from the render layer and dispatch it.
    pub fn dispatch_json(&self, raw: &str) -> Result<(), serde_json::Error> {
        let action = Action::from_json(raw)?;
        self.dispatch(action);
        Ok(())
    }

    /// Current immutable snapshot.
    pub fn state(&self) -> Arc<GlobalState> {
        self.inner.state.borrow().clone()
    }

    /// Receiver that wakes after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<Arc<GlobalState>> {
        self.inner.state.subscribe()
    }
}
