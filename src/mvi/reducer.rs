//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen and it must
/// be total: every intent has a defined transition, identity included.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state. Pure, no side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
