use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::Api;
use crate::context::Context;
use crate::input::Key;
use crate::lifecycle::{self, Debouncer, RequestHandle, Scope};
use crate::mvi::LocalStore;
use crate::store::Action;

use super::intent::SearchIntent;
use super::reducer::SearchReducer;
use super::state::SearchState;

type QuerySlot = Arc<Mutex<Option<RequestHandle>>>;

/// Live search overlay.
///
/// Owns the debounce timer, the in-flight query and the Escape listener.
/// Dropping the engine releases all three.
pub struct SearchEngine {
    state: Arc<LocalStore<SearchReducer>>,
    api: Api,
    debouncer: Debouncer,
    query: QuerySlot,
    scope: Scope,
}

impl SearchEngine {
    pub fn mount(ctx: &Context) -> Self {
        let scope = Scope::new("search");
        let store = ctx.store.clone();
        scope.add(ctx.keys.register(move |key| {
            if key == Key::Escape {
                store.dispatch(Action::CloseSearch);
            }
        }));

        Self {
            state: Arc::new(LocalStore::default()),
            api: ctx.api.clone(),
            debouncer: Debouncer::new("search-debounce", ctx.config.search.debounce()),
            query: Arc::new(Mutex::new(None)),
            scope,
        }
    }

    /// Feed the current value of the search field.
    pub fn input(&self, term: impl Into<String>) {
        let term = term.into();
        // Waits out a settle callback already running, so the query it
        // started is in the slot before the slot is emptied.
        self.debouncer.cancel();
        // Results for an older term must never land after this point.
        let stale = self.query.lock().take();
        drop(stale);

        self.state.dispatch(SearchIntent::TermChanged(term.clone()));
        if term.trim().is_empty() {
            return;
        }

        let state = Arc::clone(&self.state);
        let api = self.api.clone();
        let query = Arc::clone(&self.query);
        self.debouncer
            .schedule(move || issue_query(&state, &api, &query, term));
    }

    pub fn state(&self) -> SearchState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// True while a settle timer is armed.
    pub fn is_waiting(&self) -> bool {
        self.debouncer.is_pending()
    }
}

fn issue_query(
    state: &Arc<LocalStore<SearchReducer>>,
    api: &Api,
    query: &QuerySlot,
    term: String,
) {
    let before = state.read(|s| s.request_count);
    state.dispatch(SearchIntent::Settled(term.clone()));
    if state.read(|s| s.request_count) == before {
        return;
    }

    tracing::debug!(%term, "search settled");
    let api = api.clone();
    let deliver_to = Arc::clone(state);
    let handle = lifecycle::begin(
        "search",
        async move { api.search(&term).await },
        move |result| match result {
            Ok(posts) => deliver_to.dispatch(SearchIntent::ResultsArrived(posts)),
            Err(err) => deliver_to.dispatch(SearchIntent::QueryFailed(err.user_message().into())),
        },
    );
    let superseded = query.lock().replace(handle);
    drop(superseded);
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.debouncer.cancel();
        let query = self.query.lock().take();
        drop(query);
        self.scope.close();
    }
}
