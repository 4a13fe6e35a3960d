//! Flash message texts dispatched by the core.

pub const LOGGED_IN: &str = "You have successfully logged in.";
pub const INVALID_LOGIN: &str = "Invalid username / password.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
pub const SESSION_UNVERIFIED: &str = "We could not verify your session.";
pub const POST_UPDATED: &str = "Post was updated.";
pub const POST_DELETED: &str = "Post was successfully deleted.";
