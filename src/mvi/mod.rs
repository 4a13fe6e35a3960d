//! Model-View-Intent primitives shared by the global container and every
//! feature's local state.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ renderer
//!    ↑                                │
//!    └────────────────────────────────┘
//! ```
//!
//! - **State**: immutable snapshot a renderer reads
//! - **Intent**: user input or a settled side effect
//! - **Reducer**: pure `(State, Intent) -> State`
//!
//! Side effects (requests, timers, listeners) never run inside a reducer.
//! Feature controllers perform them around `dispatch` calls.

mod counter;
mod intent;
mod reducer;
mod state;
mod store;

pub use counter::SubmitCounter;
pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
pub use store::LocalStore;
