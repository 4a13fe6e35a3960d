//! User profile with an optimistic follow toggle.

mod controller;
mod intent;
mod reducer;
mod state;

pub use controller::ProfileView;
pub use intent::ProfileIntent;
pub use reducer::ProfileReducer;
pub use state::ProfileState;
