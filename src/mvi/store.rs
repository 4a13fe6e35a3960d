//! Observable local state cell driven by a reducer.

use std::marker::PhantomData;

use tokio::sync::watch;

use super::reducer::Reducer;

/// Feature-local state container.
///
/// Each `dispatch` applies the reducer under the channel's write lock, so two
/// intents never interleave and observers only ever see whole transitions.
pub struct LocalStore<R: Reducer> {
    state: watch::Sender<R::State>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> LocalStore<R> {
    pub fn new(initial: R::State) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            _reducer: PhantomData,
        }
    }

    /// Run the reducer over the current state.
    pub fn dispatch(&self, intent: R::Intent) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = R::reduce(current, intent);
        });
    }

    /// Clone of the current snapshot.
    pub fn snapshot(&self) -> R::State {
        self.state.borrow().clone()
    }

    /// Read part of the current snapshot without cloning all of it.
    pub fn read<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.state.subscribe()
    }
}

impl<R: Reducer> Default for LocalStore<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}
