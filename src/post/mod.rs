//! Single post page.

mod controller;
mod intent;
mod reducer;
mod state;

pub use controller::PostView;
pub use intent::PostViewIntent;
pub use reducer::PostViewReducer;
pub use state::PostViewState;
