//! Process-wide wiring of the store, backend, key bus and chat channel.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::{Api, ApiError, HttpApi, HttpClient};
use crate::auth::{self, SessionValidator};
use crate::chat::{ChannelError, Connector, LiveChat, WsConnector};
use crate::config::Config;
use crate::context::Context;
use crate::editor::PostEditor;
use crate::input::{Key, KeyBus};
use crate::lifecycle::Outcome;
use crate::post::PostView;
use crate::profile::ProfileView;
use crate::search::SearchEngine;
use crate::session::{FileStorage, KeyValueStore, SessionStore, StorageError};
use crate::store::{Action, Store};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("Operation was cancelled")]
    Cancelled,
}

type ChatSlot = Arc<watch::Sender<Option<Arc<LiveChat>>>>;

/// Application client.
///
/// Owns the single chat channel: [`Client::start`] spawns a watcher that
/// connects it when a session begins and disconnects it when the session ends,
/// forced logout included.
pub struct Client {
    ctx: Context,
    connector: Arc<dyn Connector>,
    validator: SessionValidator,
    chat: ChatSlot,
    shutdown: CancellationToken,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl Client {
    pub fn new(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        http: Arc<dyn HttpApi>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let store = Store::new(SessionStore::new(storage));
        let ctx = Context::new(store, Api::new(http), KeyBus::new(), Arc::new(config));
        let (chat, _) = watch::channel(None);
        Self {
            ctx,
            connector,
            validator: SessionValidator::new(),
            chat: Arc::new(chat),
            shutdown: CancellationToken::new(),
            watcher: Mutex::new(None),
        }
    }

    /// Client backed by the file storage, HTTP backend and WebSocket chat
    /// described by `config`.
    pub fn from_config(config: Config) -> Result<Self, ClientError> {
        let storage = FileStorage::open(config.storage.resolve())?;
        let http = HttpClient::new(&config.server)?;
        let connector = WsConnector::new(&config.server);
        Ok(Self::new(
            config,
            Arc::new(storage),
            Arc::new(http),
            Arc::new(connector),
        ))
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn store(&self) -> &Store {
        &self.ctx.store
    }

    /// Validate a restored session and start the chat watcher. Idempotent.
    pub fn start(&self) {
        self.validator.check(&self.ctx);

        let mut watcher = self.watcher.lock();
        if watcher.is_some() {
            return;
        }
        *watcher = Some(tokio::spawn(watch_session(
            self.ctx.clone(),
            Arc::clone(&self.connector),
            Arc::clone(&self.chat),
            self.shutdown.clone(),
        )));
    }

    /// Returns `Ok(false)` when the credentials were rejected.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, ClientError> {
        match auth::login(&self.ctx, &self.shutdown, username, password).await {
            Outcome::Success(logged_in) => Ok(logged_in),
            Outcome::Failure(err) => Err(err.into()),
            Outcome::Cancelled => Err(ClientError::Cancelled),
        }
    }

    pub fn logout(&self) {
        self.ctx.store.dispatch(Action::Logout);
    }

    /// Chat of the current session, once its channel is connected.
    pub fn chat(&self) -> Option<Arc<LiveChat>> {
        self.chat.borrow().clone()
    }

    pub fn chat_updates(&self) -> watch::Receiver<Option<Arc<LiveChat>>> {
        self.chat.subscribe()
    }

    pub fn open_search(&self) -> SearchEngine {
        self.ctx.store.dispatch(Action::OpenSearch);
        SearchEngine::mount(&self.ctx)
    }

    pub fn edit_post(&self, post_id: &str) -> PostEditor {
        PostEditor::mount(&self.ctx, post_id)
    }

    pub fn view_post(&self, post_id: &str) -> PostView {
        PostView::mount(&self.ctx, post_id)
    }

    pub fn view_profile(&self, username: &str) -> ProfileView {
        ProfileView::mount(&self.ctx, username)
    }

    pub fn press(&self, key: Key) {
        self.ctx.keys.press(key);
    }

    /// Cancel background work and close the chat channel.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.validator.cancel();
        let watcher = self.watcher.lock().take();
        if let Some(watcher) = watcher {
            if let Err(e) = watcher.await {
                tracing::error!(error = %e, "session watcher panicked");
            }
        }
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn watch_session(
    ctx: Context,
    connector: Arc<dyn Connector>,
    chat: ChatSlot,
    shutdown: CancellationToken,
) {
    let mut updates = ctx.store.subscribe();
    let mut current: Option<String> = None;

    loop {
        let token = updates
            .borrow_and_update()
            .session
            .token()
            .map(str::to_owned);

        if token != current {
            close_chat(&chat);
            if token.is_some() {
                let url = ctx.config.server.chat_url.as_str();
                let connected = tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => break,
                    connected = connector.connect(url) => connected,
                };
                match connected {
                    Ok(channel) => {
                        let live = LiveChat::attach(channel, ctx.store.clone());
                        chat.send_replace(Some(Arc::new(live)));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "chat unavailable for this session");
                    }
                }
            }
            current = token;
        }

        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    close_chat(&chat);
    tracing::debug!("session watcher stopped");
}

fn close_chat(chat: &ChatSlot) {
    if let Some(live) = chat.send_replace(None) {
        live.disconnect();
    }
}
