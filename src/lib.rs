//! Client-side state and coordination layer for the ComplexApp social
//! posting site.
//!
//! A single [`store::Store`] holds the global state and is only changed by
//! dispatching [`store::Action`]s. Features (search, chat, post editor,
//! profile, post view) keep local state in reducer-backed cells and tie every
//! request, timer and listener they start to their own lifetime through
//! [`lifecycle`].

pub mod api;
pub mod auth;
pub mod chat;
pub mod client;
pub mod config;
pub mod context;
pub mod editor;
pub mod input;
pub mod lifecycle;
pub mod logging;
pub mod mvi;
pub mod post;
pub mod profile;
pub mod search;
pub mod session;
pub mod store;

pub use client::{Client, ClientError};
pub use config::Config;
pub use context::Context;
