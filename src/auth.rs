//! Login and session validation flows.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::context::Context;
use crate::lifecycle::{self, Outcome, RequestHandle};
use crate::store::{flash, Action, Store};

/// Log in with `username` / `password`.
///
/// Resolves to `Success(true)` when a session started, `Success(false)` when
/// the backend rejected the credentials. Either way the user sees a flash
/// message; failures surface theirs too. Cancelled attempts change nothing.
pub async fn login(
    ctx: &Context,
    token: &CancellationToken,
    username: &str,
    password: &str,
) -> Outcome<bool> {
    match lifecycle::run(token, ctx.api.login(username, password)).await {
        Outcome::Success(Some(user)) => {
            tracing::info!(username = %user.username, "logged in");
            ctx.store.dispatch(Action::Login(user));
            ctx.store.dispatch(Action::flash(flash::LOGGED_IN));
            Outcome::Success(true)
        }
        Outcome::Success(None) => {
            tracing::info!(%username, "login rejected");
            ctx.store.dispatch(Action::flash(flash::INVALID_LOGIN));
            Outcome::Success(false)
        }
        Outcome::Failure(err) => {
            tracing::warn!(error = %err, "login failed");
            ctx.store.dispatch(Action::flash(err.user_message()));
            Outcome::Failure(err)
        }
        Outcome::Cancelled => Outcome::Cancelled,
    }
}

/// Forced logout after the backend rejected the session token.
pub fn expire_session(store: &Store) {
    tracing::info!("session expired");
    store.dispatch(Action::Logout);
    store.dispatch(Action::flash(flash::SESSION_EXPIRED));
}

/// Validates each session token with the backend at most once.
///
/// Repeated [`check`](Self::check) calls for the same token are no-ops, so
/// calling it from every render is safe. A token is only expired if it is
/// still the current one when the answer arrives.
#[derive(Default)]
pub struct SessionValidator {
    checked: Mutex<Option<String>>,
    in_flight: Mutex<Option<RequestHandle>>,
}

impl SessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a validation request was issued.
    pub fn check(&self, ctx: &Context) -> bool {
        let Some(token) = ctx.token() else {
            return false;
        };
        {
            let mut checked = self.checked.lock();
            if checked.as_deref() == Some(token.as_str()) {
                return false;
            }
            *checked = Some(token.clone());
        }

        let api = ctx.api.clone();
        let store = ctx.store.clone();
        let request_token = token.clone();
        let handle = lifecycle::begin(
            "check-token",
            async move { api.check_token(&request_token).await },
            move |result| {
                if store.state().session.token() != Some(token.as_str()) {
                    tracing::debug!("session changed during validation");
                    return;
                }
                match result {
                    Ok(true) => tracing::debug!("session token is valid"),
                    Ok(false) => expire_session(&store),
                    Err(err) if err.is_auth_expired() => expire_session(&store),
                    Err(_) => store.dispatch(Action::flash(flash::SESSION_UNVERIFIED)),
                }
            },
        );

        let previous = self.in_flight.lock().replace(handle);
        drop(previous);
        true
    }

    /// Abandon a pending validation. The token still counts as checked.
    pub fn cancel(&self) {
        let handle = self.in_flight.lock().take();
        drop(handle);
    }
}
