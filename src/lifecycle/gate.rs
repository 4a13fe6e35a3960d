//! Delivery gate shared by an owner and the work it started.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Settlement state of a request or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Succeeded,
    Failed,
    Cancelled,
}

impl RequestStatus {
    pub fn is_settled(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// Open until the work delivers or the owner closes it.
///
/// Delivery runs while holding the gate's lock, so once [`Gate::close`]
/// returns no delivery can be running or start later.
#[derive(Clone)]
pub(crate) struct Gate {
    open: Arc<Mutex<bool>>,
    status: Arc<watch::Sender<RequestStatus>>,
    token: CancellationToken,
}

impl Gate {
    pub(crate) fn new() -> Self {
        let (status, _) = watch::channel(RequestStatus::Pending);
        Self {
            open: Arc::new(Mutex::new(true)),
            status: Arc::new(status),
            token: CancellationToken::new(),
        }
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns true only for the call that actually closed a pending gate.
    pub(crate) fn close(&self) -> bool {
        let mut open = self.open.lock();
        if !*open {
            return false;
        }
        *open = false;
        self.token.cancel();
        self.status.send_replace(RequestStatus::Cancelled);
        true
    }

    /// Run `deliver` if still open, then close with `status`.
    pub(crate) fn deliver<R>(&self, status: RequestStatus, deliver: impl FnOnce() -> R) -> Option<R> {
        let mut open = self.open.lock();
        if !*open {
            return None;
        }
        let result = deliver();
        *open = false;
        self.status.send_replace(status);
        Some(result)
    }

    pub(crate) fn status(&self) -> RequestStatus {
        *self.status.borrow()
    }

    pub(crate) async fn settled(&self) -> RequestStatus {
        let mut rx = self.status.subscribe();
        let status = match rx.wait_for(|status| status.is_settled()).await {
            Ok(status) => *status,
            Err(_) => RequestStatus::Cancelled,
        };
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_is_idempotent() {
        let gate = Gate::new();
        assert!(gate.close());
        assert!(!gate.close());
        assert_eq!(gate.status(), RequestStatus::Cancelled);
        assert!(gate.token().is_cancelled());
    }

    #[test]
    fn closed_gate_refuses_delivery() {
        let gate = Gate::new();
        gate.close();
        assert_eq!(gate.deliver(RequestStatus::Succeeded, || 1), None);
        assert_eq!(gate.status(), RequestStatus::Cancelled);
    }

    #[test]
    fn delivery_happens_once() {
        let gate = Gate::new();
        assert_eq!(gate.deliver(RequestStatus::Succeeded, || 1), Some(1));
        assert_eq!(gate.deliver(RequestStatus::Succeeded, || 2), None);
        assert!(!gate.close());
        assert_eq!(gate.status(), RequestStatus::Succeeded);
    }

    #[tokio::test]
    async fn settled_waits_for_delivery() {
        let gate = Gate::new();
        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.settled().await })
        };
        tokio::task::yield_now().await;
        gate.deliver(RequestStatus::Failed, || ());
        assert_eq!(waiter.await.unwrap(), RequestStatus::Failed);
        assert_eq!(gate.settled().await, RequestStatus::Failed);
    }
}
