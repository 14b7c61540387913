//! Client-side key/value storage for credentials.
//!
//! Two scopes exist: `session` lives for one app session, `local` survives
//! across sessions. Login writes its token to the session scope under
//! `SESSION_TOKEN_KEY`; the request interceptor reads the local scope under
//! `REQUEST_TOKEN_KEY`. The keys differ, so a fresh login does not by itself
//! authorize API requests.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

pub const SESSION_TOKEN_KEY: &str = "access_token";
pub const REQUEST_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Clone, Default)]
pub struct Storage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Storage {
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientStorage {
    pub session: Storage,
    pub local: Storage,
}

impl ClientStorage {
    pub fn session_token(&self) -> Option<String> {
        self.session.get(SESSION_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn request_token(&self) -> Option<String> {
        self.local.get(REQUEST_TOKEN_KEY).filter(|t| !t.is_empty())
    }
}
