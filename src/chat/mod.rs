//! Live messaging.
//!
//! One channel per logged-in session, shared by whatever renders the chat
//! panel. [`LiveChat`] keeps the message log locally and reports unread
//! messages to the global store.

mod channel;
mod intent;
mod live;
mod reducer;
mod state;
mod ws;

pub use channel::{
    Channel, ChannelError, Connector, Envelope, EventHandler, HandlerRegistry, MemoryChannel,
    MemoryConnector,
};
pub use intent::ChatIntent;
pub use live::{LiveChat, CHAT_FROM_BROWSER, CHAT_FROM_SERVER};
pub use reducer::ChatReducer;
pub use state::{ChatMessage, ChatState};
pub use ws::{WsChannel, WsConnector};
