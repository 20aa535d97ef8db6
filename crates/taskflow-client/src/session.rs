//! Session Store
//!
//! Bearer token, refresh token and cached user live in one of two key-value
//! areas: persistent (`localStorage`) or session-scoped (`sessionStorage`).
//! The area is picked once at login; reads always check persistent first.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, SessionError};
use crate::models::User;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

const ALL_KEYS: [&str; 3] = [USER_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY];

/// Message shown when a login response carries no access token
pub const INVALID_RESPONSE: &str = "Invalid response from server";
/// Message shown when the login response cannot be stored
pub const STORAGE_FAILED: &str = "Failed to process login. Please try again.";

/// Minimal string key-value area (`localStorage`, `sessionStorage`, memory)
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str);
}

/// In-memory area, used off-browser and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SessionError::WriteRefused(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Which area a login writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Survives browser restarts ("keep me logged in")
    Persistent,
    /// Dropped when the tab closes
    SessionScoped,
}

impl Persistence {
    pub fn from_keep_logged_in(keep: bool) -> Self {
        if keep {
            Persistence::Persistent
        } else {
            Persistence::SessionScoped
        }
    }
}

/// User object cached next to the token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl From<&User> for StoredUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: format!("{} {}", user.first_name, user.last_name),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Body of `/user/login/` and `/user/auth/google/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Both storage areas behind one handle
#[derive(Clone)]
pub struct Session {
    persistent: Arc<dyn KeyValueStore>,
    scoped: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(persistent: Arc<dyn KeyValueStore>, scoped: Arc<dyn KeyValueStore>) -> Self {
        Self { persistent, scoped }
    }

    /// Two fresh in-memory areas
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    fn area(&self, persistence: Persistence) -> &dyn KeyValueStore {
        match persistence {
            Persistence::Persistent => self.persistent.as_ref(),
            Persistence::SessionScoped => self.scoped.as_ref(),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.persistent
            .get(key)
            .filter(|v| !v.is_empty())
            .or_else(|| self.scoped.get(key).filter(|v| !v.is_empty()))
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Cached user; unreadable JSON counts as absent
    pub fn cached_user(&self) -> Option<StoredUser> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("[SESSION] {}", SessionError::Corrupt(e.to_string()));
                None
            }
        }
    }

    /// Token and cached user both present. The token is not verified.
    pub fn is_authenticated(&self) -> bool {
        self.read(USER_KEY).is_some() && self.access_token().is_some()
    }

    /// Area currently holding the token
    pub fn token_area(&self) -> Option<Persistence> {
        if self.persistent.get(ACCESS_TOKEN_KEY).is_some() {
            Some(Persistence::Persistent)
        } else if self.scoped.get(ACCESS_TOKEN_KEY).is_some() {
            Some(Persistence::SessionScoped)
        } else {
            None
        }
    }

    /// Store a login response.
    ///
    /// Nothing is written unless both `access` and `user` are present.
    pub fn persist_login(
        &self,
        response: &LoginResponse,
        persistence: Persistence,
    ) -> Result<StoredUser, AuthError> {
        let access = response
            .access
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AuthError::failed(INVALID_RESPONSE))?;
        let user = response
            .user
            .as_ref()
            .map(StoredUser::from)
            .ok_or_else(|| AuthError::failed(STORAGE_FAILED))?;
        let user_json = serde_json::to_string(&user).map_err(|_| AuthError::failed(STORAGE_FAILED))?;

        let area = self.area(persistence);
        let written = area
            .set(ACCESS_TOKEN_KEY, access)
            .and_then(|_| match response.refresh.as_deref() {
                Some(refresh) => area.set(REFRESH_TOKEN_KEY, refresh),
                None => Ok(()),
            })
            .and_then(|_| area.set(USER_KEY, &user_json));

        if let Err(e) = written {
            log::error!("[SESSION] Token storage error: {}", e);
            for key in ALL_KEYS {
                area.remove(key);
            }
            return Err(AuthError::failed(STORAGE_FAILED));
        }
        Ok(user)
    }

    /// Rewrite the cached user next to the current token
    pub fn store_user(&self, user: &StoredUser) -> Result<(), SessionError> {
        let json = serde_json::to_string(user).map_err(|e| SessionError::WriteRefused(e.to_string()))?;
        let area = self.token_area().unwrap_or(Persistence::Persistent);
        self.area(area).set(USER_KEY, &json)
    }

    /// Drop the cached user from both areas
    pub fn clear_user(&self) {
        self.persistent.remove(USER_KEY);
        self.scoped.remove(USER_KEY);
    }

    /// Logout: drop every key from both areas
    pub fn clear(&self) {
        for key in ALL_KEYS {
            self.persistent.remove(key);
            self.scoped.remove(key);
        }
    }
}
