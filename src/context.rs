//! Dependencies handed to every feature on mount.

use std::sync::Arc;

use crate::api::Api;
use crate::config::Config;
use crate::input::KeyBus;
use crate::store::Store;

#[derive(Clone)]
pub struct Context {
    pub store: Store,
    pub api: Api,
    pub keys: KeyBus,
    pub config: Arc<Config>,
}

impl Context {
    pub fn new(store: Store, api: Api, keys: KeyBus, config: Arc<Config>) -> Self {
        Self {
            store,
            api,
            keys,
            config,
        }
    }

    /// Token of the current session, if any.
    pub fn token(&self) -> Option<String> {
        self.store.state().session.token().map(str::to_owned)
    }

    pub fn username(&self) -> Option<String> {
        self.store.state().session.username().map(str::to_owned)
    }
}
