//! Debounced live search.
//!
//! Each keystroke re-arms a settle timer; only a timer that fires uncancelled
//! issues a query, and any newer keystroke cancels both the timer and the
//! query in flight. Stale results are therefore dropped by cancellation rather
//! than by comparing timestamps.

mod engine;
mod intent;
mod reducer;
mod state;

pub use engine::SearchEngine;
pub use intent::SearchIntent;
pub use reducer::SearchReducer;
pub use state::{SearchPhase, SearchState};
