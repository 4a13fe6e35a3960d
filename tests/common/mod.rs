//! Shared test utilities and fakes.

#![allow(dead_code, unused_imports)]

pub mod fake_api;
pub mod local_server;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use complexapp::api::{Api, User};
use complexapp::input::KeyBus;
use complexapp::session::{KeyValueStore, MemoryStorage, SessionStore, StorageError};
use complexapp::store::{Action, Store};
use complexapp::{Config, Context};
use serde_json::{json, Value};

pub use fake_api::{CapturedRequest, FakeHttp, FakeResponse};

pub fn user(name: &str) -> User {
    User {
        id: None,
        username: name.to_string(),
        avatar_url: format!("https://gravatar.com/avatar/{name}?s=128"),
        token: format!("token-{name}"),
    }
}

/// Backend JSON for a post.
pub fn post_json(id: &str, title: &str, author: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "body": format!("body of {title}"),
        "createdDate": "2024-01-01T00:00:00.000Z",
        "author": {
            "username": author,
            "avatar": format!("https://gravatar.com/avatar/{author}?s=128"),
        },
        "isVisitorOwner": false,
    })
}

/// Storage that counts batch writes so tests can check persistence happens
/// once per session transition.
#[derive(Default)]
pub struct CountingStorage {
    inner: MemoryStorage,
    pub set_all_calls: AtomicUsize,
    pub remove_all_calls: AtomicUsize,
}

impl CountingStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn writes(&self) -> usize {
        self.set_all_calls.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.remove_all_calls.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for CountingStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        self.set_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.set_all(entries)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.remove_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.remove_all(keys)
    }
}

pub fn store_with(storage: Arc<dyn KeyValueStore>) -> Store {
    Store::new(SessionStore::new(storage))
}

pub fn context(http: Arc<FakeHttp>) -> Context {
    context_with(http, Arc::new(MemoryStorage::new()))
}

pub fn context_with(http: Arc<FakeHttp>, storage: Arc<dyn KeyValueStore>) -> Context {
    Context::new(
        store_with(storage),
        Api::new(http),
        KeyBus::new(),
        Arc::new(Config::default()),
    )
}

/// Context whose store already holds a session for `name`.
pub fn logged_in_context(http: Arc<FakeHttp>, name: &str) -> Context {
    let ctx = context(http);
    ctx.store.dispatch(Action::Login(user(name)));
    ctx
}

/// Let spawned tasks run without moving the clock meaningfully.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
