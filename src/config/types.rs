use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend endpoints and timeouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL for HTTP calls (e.g., "http://localhost:9876").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// WebSocket URL of the chat channel.
    #[serde(default = "default_chat_url")]
    pub chat_url: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

/// Live search tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a query is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Where the durable session fields live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:9876".to_string()
}

fn default_chat_url() -> String {
    "ws://localhost:9876/chat".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_debounce_ms() -> u64 {
    750
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_url: default_chat_url(),
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl StorageConfig {
    /// Resolved storage file path.
    ///
    /// Uses `~/.local/share/complexapp/session.json` on Linux or the
    /// equivalent from `dirs::data_dir()`, falling back to the current directory.
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("complexapp").join("session.json")
    }
}
