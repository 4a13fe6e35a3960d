//! Global key-press fan-out.
//!
//! The render layer forwards raw key presses to a shared [`KeyBus`]; features
//! register listeners on mount and get back a [`Disposer`] that deregisters
//! them on teardown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::lifecycle::Disposer;

const KEY_CODE_ENTER: u32 = 13;
const KEY_CODE_ESCAPE: u32 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
    Other(u32),
}

impl Key {
    /// Map a DOM-style key code.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            KEY_CODE_ESCAPE => Key::Escape,
            KEY_CODE_ENTER => Key::Enter,
            other => char::from_u32(other)
                .filter(|c| !c.is_control())
                .map_or(Key::Other(other), Key::Char),
        }
    }
}

type Listener = Arc<dyn Fn(Key) + Send + Sync>;

#[derive(Clone, Default)]
pub struct KeyBus {
    inner: Arc<KeyBusInner>,
}

#[derive(Default)]
struct KeyBusInner {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener)>>,
}

impl KeyBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for every key press until the returned disposer runs.
    pub fn register(&self, listener: impl Fn(Key) + Send + Sync + 'static) -> Disposer {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));

        let inner = Arc::downgrade(&self.inner);
        Disposer::new("key-listener", move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.lock().retain(|(other, _)| *other != id);
            }
        })
    }

    /// Deliver `key` to every registered listener.
    pub fn press(&self, key: Key) {
        // Listeners may register or dispose while handling the key.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(key);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}
