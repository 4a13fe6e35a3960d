//! Post editor: fetch, field validation and save.

mod controller;
mod intent;
mod reducer;
mod state;

pub use controller::PostEditor;
pub use intent::EditorIntent;
pub use reducer::EditorReducer;
pub use state::{EditorState, Field, BODY_REQUIRED, TITLE_REQUIRED};
