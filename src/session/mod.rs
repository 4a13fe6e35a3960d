//! Durable mirror of the login session.
//!
//! Three fields (token, username, avatar) are written together on login and
//! removed together on logout. A partial leftover is never treated as a
//! session.

mod storage;

use std::sync::Arc;

pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};

use crate::api::User;
use crate::store::Session;

pub const TOKEN_KEY: &str = "complexappToken";
pub const USERNAME_KEY: &str = "complexappUsername";
pub const AVATAR_KEY: &str = "complexappAvatar";

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USERNAME_KEY, AVATAR_KEY];

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Restore the persisted user, if all three fields are present.
    pub fn load(&self) -> Option<User> {
        let token = self.storage.get(TOKEN_KEY);
        let username = self.storage.get(USERNAME_KEY);
        let avatar = self.storage.get(AVATAR_KEY);

        match (token, username, avatar) {
            (Some(token), Some(username), Some(avatar_url)) => Some(User {
                id: None,
                username,
                avatar_url,
                token,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!("discarding partially persisted session");
                if let Err(err) = self.clear() {
                    tracing::error!(error = %err, "failed to clear partial session");
                }
                None
            }
        }
    }

    pub fn persist(&self, user: &User) -> Result<(), StorageError> {
        self.storage.set_all(&[
            (TOKEN_KEY, user.token.as_str()),
            (USERNAME_KEY, user.username.as_str()),
            (AVATAR_KEY, user.avatar_url.as_str()),
        ])
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_all(&SESSION_KEYS)
    }

    /// Persist or clear to match `session`.
    pub fn mirror(&self, session: &Session) -> Result<(), StorageError> {
        match session.user() {
            Some(user) => self.persist(user),
            None => self.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: None,
            username: "alice".into(),
            avatar_url: "a.png".into(),
            token: "t1".into(),
        }
    }

    #[test]
    fn persist_then_load() {
        let storage = Arc::new(MemoryStorage::new());
        let sessions = SessionStore::new(storage.clone());
        sessions.persist(&user()).unwrap();
        assert_eq!(storage.len(), 3);
        assert_eq!(sessions.load(), Some(user()));
    }

    #[test]
    fn clear_removes_all_three() {
        let storage = Arc::new(MemoryStorage::new());
        let sessions = SessionStore::new(storage.clone());
        sessions.persist(&user()).unwrap();
        sessions.clear().unwrap();
        assert!(storage.is_empty());
        assert_eq!(sessions.load(), None);
    }

    #[test]
    fn partial_session_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "t1").unwrap();
        storage.set(USERNAME_KEY, "alice").unwrap();

        let sessions = SessionStore::new(storage.clone());
        assert_eq!(sessions.load(), None);
        assert!(storage.is_empty());
    }
}
