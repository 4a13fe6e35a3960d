//! Disposers and the scopes that own them.

use parking_lot::Mutex;
use scopeguard::ScopeGuard;

type Cleanup = Box<dyn FnOnce(()) + Send>;

/// Reverses one acquisition (listener, subscription, request) exactly once.
///
/// Runs on [`Disposer::dispose`] or on drop, whichever comes first.
#[must_use = "dropping a Disposer immediately runs its cleanup"]
pub struct Disposer {
    label: &'static str,
    guard: ScopeGuard<(), Cleanup>,
}

impl Disposer {
    pub fn new(label: &'static str, cleanup: impl FnOnce() + Send + 'static) -> Self {
        let cleanup: Cleanup = Box::new(move |()| cleanup());
        Self {
            label,
            guard: scopeguard::guard((), cleanup),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn dispose(self) {
        tracing::trace!(disposer = self.label, "dispose");
        drop(self.guard);
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer").field("label", &self.label).finish()
    }
}

/// Ordered set of disposers released together on teardown.
///
/// Disposers run in reverse acquisition order. Anything added after the scope
/// closed is disposed on the spot, so late acquisitions cannot leak.
pub struct Scope {
    name: &'static str,
    disposers: Mutex<Option<Vec<Disposer>>>,
}

impl Scope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            disposers: Mutex::new(Some(Vec::new())),
        }
    }

    pub fn add(&self, disposer: Disposer) {
        let rejected = match self.disposers.lock().as_mut() {
            Some(disposers) => {
                disposers.push(disposer);
                None
            }
            None => Some(disposer),
        };
        if let Some(disposer) = rejected {
            tracing::debug!(
                scope = self.name,
                disposer = disposer.label(),
                "scope already closed, disposing immediately"
            );
            disposer.dispose();
        }
    }

    /// Run every disposer. Returns how many ran; zero on repeated calls.
    pub fn close(&self) -> usize {
        let Some(mut disposers) = self.disposers.lock().take() else {
            return 0;
        };
        let count = disposers.len();
        while let Some(disposer) = disposers.pop() {
            disposer.dispose();
        }
        tracing::debug!(scope = self.name, count, "scope closed");
        count
    }

    pub fn len(&self) -> usize {
        self.disposers.lock().as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.close();
    }
}
