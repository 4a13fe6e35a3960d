//! Request lifecycle management.
//!
//! Every outbound operation either completes, fails, or is cancelled, and a
//! result is never delivered after its owner tore down:
//!
//! - [`begin`] spawns the operation and returns a [`RequestHandle`]. The
//!   delivery callback runs under the handle's gate, so once `cancel()` (or
//!   drop) returns nothing from that request can touch state again.
//! - [`run`] is the awaited form used by flows that already live in a task.
//! - [`Scope`] / [`Disposer`] give features one place to release listeners,
//!   subscriptions and requests on teardown.
//! - [`Debouncer`] is the replace-and-cancel timer behind live search.

mod gate;
mod scope;
pub mod timer;

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

pub use gate::RequestStatus;
pub use scope::{Disposer, Scope};
pub use timer::{Debouncer, TimerHandle};

use crate::api::ApiError;
use gate::Gate;

/// How an operation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(ApiError),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn status(&self) -> RequestStatus {
        match self {
            Outcome::Success(_) => RequestStatus::Succeeded,
            Outcome::Failure(_) => RequestStatus::Failed,
            Outcome::Cancelled => RequestStatus::Cancelled,
        }
    }
}

impl<T> From<Result<T, ApiError>> for Outcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failure(err),
        }
    }
}

/// Await `operation` unless `token` is cancelled first.
pub async fn run<T, F>(token: &CancellationToken, operation: F) -> Outcome<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            tracing::debug!("operation cancelled");
            Outcome::Cancelled
        }
        result = operation => Outcome::from(result),
    }
}

/// Owned handle to an in-flight request. Dropping it cancels the request.
pub struct RequestHandle {
    label: &'static str,
    gate: Gate,
}

impl RequestHandle {
    /// Idempotent; a no-op once the request has settled.
    pub fn cancel(&self) {
        if self.gate.close() {
            tracing::debug!(request = self.label, "request cancelled");
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.gate.status()
    }

    /// Wait until the request delivered, failed, or was cancelled.
    pub async fn settled(&self) -> RequestStatus {
        self.gate.settled().await
    }

    pub fn into_disposer(self) -> Disposer {
        Disposer::new(self.label, move || self.cancel())
    }
}

impl Drop for RequestHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn `operation` and hand its result to `deliver` unless cancelled first.
///
/// Cancelled requests are dropped silently (debug log only). Failures are
/// logged at warn and still delivered so the owner can surface them.
/// Must be called from within a tokio runtime.
pub fn begin<T, F, D>(label: &'static str, operation: F, deliver: D) -> RequestHandle
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
    D: FnOnce(Result<T, ApiError>) + Send + 'static,
{
    let gate = Gate::new();
    let task_gate = gate.clone();
    let request_id = Uuid::new_v4();
    let span = tracing::debug_span!("request", request = label, %request_id);

    tokio::spawn(
        async move {
            match run(task_gate.token(), operation).await {
                Outcome::Cancelled => {}
                Outcome::Success(value) => {
                    if task_gate
                        .deliver(RequestStatus::Succeeded, || deliver(Ok(value)))
                        .is_none()
                    {
                        tracing::debug!("owner gone before delivery");
                    }
                }
                Outcome::Failure(err) => {
                    tracing::warn!(error = %err, "request failed");
                    task_gate.deliver(RequestStatus::Failed, || deliver(Err(err)));
                }
            }
        }
        .instrument(span),
    );

    RequestHandle { label, gate }
}
