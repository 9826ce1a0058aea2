use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{User, UserRole};

pub const USER_SESSION_KEY: &str = "bcx_user";

/// Key-value session storage injected into the session and cart state.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn clear(&self, key: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .lock()
            .expect("session mutex poisoned")
            .insert(key.to_string(), value);
    }

    fn clear(&self, key: &str) {
        self.entries
            .lock()
            .expect("session mutex poisoned")
            .remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoCredential {
    pub email: String,
    pub password: String,
}

/// Mock identity provider: demo credentials plus the user records they unlock.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    credentials: Vec<DemoCredential>,
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(credentials: Vec<DemoCredential>, users: Vec<User>) -> Self {
        Self { credentials, users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let known = self
            .credentials
            .iter()
            .any(|credential| credential.email == email && credential.password == password);
        if !known {
            return Err(AuthError::InvalidCredentials);
        }

        self.users
            .iter()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(AuthError::UnknownUser)
    }
}

/// Signed-in user state backed by a [`SessionStore`].
pub struct AuthSession<S> {
    store: Arc<S>,
    user: Option<User>,
}

impl<S> AuthSession<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store, user: None }
    }

    /// Restore the user from the store. Unreadable entries are dropped.
    pub fn hydrate(&mut self) -> Option<&User> {
        self.user = self
            .store
            .get(USER_SESSION_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(error = %err, "discarding malformed session user");
                    None
                }
            });
        self.user.as_ref()
    }

    pub fn login(
        &mut self,
        directory: &UserDirectory,
        email: &str,
        password: &str,
    ) -> Result<&User, AuthError> {
        let user = directory.authenticate(email, password)?;
        self.set_user(Some(user))?;
        debug!(email, "user signed in");
        self.user.as_ref().ok_or(AuthError::NotSignedIn)
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.store.clear(USER_SESSION_KEY);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Navigation guard: the signed-in user must hold `role`.
    pub fn require_role(&self, role: UserRole) -> Result<&User, AuthError> {
        let user = self.user.as_ref().ok_or(AuthError::NotSignedIn)?;
        if user.role == role {
            Ok(user)
        } else {
            Err(AuthError::Forbidden { required: role })
        }
    }

    fn set_user(&mut self, user: Option<User>) -> Result<(), AuthError> {
        match &user {
            Some(user) => {
                let encoded = serde_json::to_string(user).map_err(SessionError::from)?;
                self.store.set(USER_SESSION_KEY, encoded);
            }
            None => self.store.clear(USER_SESSION_KEY),
        }
        self.user = user;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session payload could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("User record not found.")]
    UnknownUser,
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("requires the {required:?} role")]
    Forbidden { required: UserRole },
    #[error(transparent)]
    Session(#[from] SessionError),
}
