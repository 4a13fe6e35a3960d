//! Transport-neutral publish/subscribe channel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::lifecycle::Disposer;

pub type EventHandler = Arc<dyn Fn(Value) + Send + Sync>;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Channel is closed")]
    Closed,

    #[error("Not logged in")]
    LoggedOut,

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Frame exchanged on the wire: `{"event": "...", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

/// Open bidirectional event channel.
pub trait Channel: Send + Sync {
    /// Call `handler` for every inbound `event`, in arrival order, until the
    /// returned disposer runs.
    fn on(&self, event: &str, handler: EventHandler) -> Disposer;

    /// Fire-and-forget publish.
    fn emit(&self, event: &str, payload: Value) -> Result<(), ChannelError>;

    fn disconnect(&self);

    fn is_connected(&self) -> bool;
}

#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Arc<dyn Channel>, ChannelError>;
}

/// Handler table shared by channel implementations.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(u64, String, EventHandler)>>,
}

impl HandlerRegistry {
    pub fn register(&self, event: &str, handler: EventHandler) -> Disposer {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .handlers
            .lock()
            .push((id, event.to_owned(), handler));

        let inner = Arc::downgrade(&self.inner);
        Disposer::new("channel-handler", move || {
            if let Some(inner) = inner.upgrade() {
                inner.handlers.lock().retain(|(other, _, _)| *other != id);
            }
        })
    }

    /// Invoke every handler for `event`. Handlers run outside the table lock.
    pub fn dispatch(&self, event: &str, payload: Value) {
        let handlers: Vec<EventHandler> = self
            .inner
            .handlers
            .lock()
            .iter()
            .filter(|(_, name, _)| name == event)
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();
        if handlers.is_empty() {
            tracing::trace!(%event, "no handler for event");
        }
        for handler in handlers {
            handler(payload.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.handlers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process channel. Inbound events are injected with [`MemoryChannel::receive`].
pub struct MemoryChannel {
    url: String,
    registry: HandlerRegistry,
    sent: Mutex<Vec<Envelope>>,
    connected: AtomicBool,
}

impl MemoryChannel {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            registry: HandlerRegistry::default(),
            sent: Mutex::new(Vec::new()),
            connected: AtomicBool::new(true),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Deliver an inbound event as if the server sent it. Ignored once disconnected.
    pub fn receive(&self, event: &str, payload: Value) {
        if self.is_connected() {
            self.registry.dispatch(event, payload);
        }
    }

    /// Everything emitted so far.
    pub fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().clone()
    }

    pub fn handler_count(&self) -> usize {
        self.registry.len()
    }
}

impl Channel for MemoryChannel {
    fn on(&self, event: &str, handler: EventHandler) -> Disposer {
        self.registry.register(event, handler)
    }

    fn emit(&self, event: &str, payload: Value) -> Result<(), ChannelError> {
        if !self.is_connected() {
            return Err(ChannelError::Closed);
        }
        self.sent.lock().push(Envelope {
            event: event.to_owned(),
            payload,
        });
        Ok(())
    }

    fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// Connector handing out [`MemoryChannel`]s and remembering each one.
#[derive(Default)]
pub struct MemoryConnector {
    channels: Mutex<Vec<Arc<MemoryChannel>>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect_count(&self) -> usize {
        self.channels.lock().len()
    }

    /// Most recently opened channel.
    pub fn latest(&self) -> Option<Arc<MemoryChannel>> {
        self.channels.lock().last().cloned()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, url: &str) -> Result<Arc<dyn Channel>, ChannelError> {
        let channel = Arc::new(MemoryChannel::new(url));
        self.channels.lock().push(Arc::clone(&channel));
        Ok(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn handlers_only_see_their_event() {
        let channel = MemoryChannel::new("mem://");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _handler = channel.on(
            "chatFromServer",
            Arc::new(move |payload: Value| sink.lock().push(payload)),
        );

        channel.receive("other", json!(1));
        channel.receive("chatFromServer", json!(2));
        assert_eq!(*seen.lock(), vec![json!(2)]);
    }

    #[test]
    fn disposed_handler_is_removed() {
        let channel = MemoryChannel::new("mem://");
        let handler = channel.on("x", Arc::new(|_: Value| {}));
        assert_eq!(channel.handler_count(), 1);
        handler.dispose();
        assert_eq!(channel.handler_count(), 0);
    }

    #[test]
    fn emit_after_disconnect_fails() {
        let channel = MemoryChannel::new("mem://");
        channel.emit("a", json!({})).unwrap();
        channel.disconnect();
        assert!(matches!(channel.emit("b", json!({})), Err(ChannelError::Closed)));
        assert_eq!(channel.sent().len(), 1);
    }

    #[test]
    fn envelope_wire_shape() {
        let envelope = Envelope {
            event: "chatFromBrowser".into(),
            payload: json!({"message": "hi", "token": "t"}),
        };
        let raw = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            raw,
            json!({"event": "chatFromBrowser", "payload": {"message": "hi", "token": "t"}})
        );
    }
}
