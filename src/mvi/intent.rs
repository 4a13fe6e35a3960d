//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User input (keystrokes, submit, follow clicks)
/// - Settled side effects (a response arrived, a timer fired)
///
/// Reducers consume intents to produce the next state.
pub trait Intent: Send + 'static {}
