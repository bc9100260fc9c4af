pub mod storage;

use tracing::{info, warn};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub use storage::KeyringStore;

use crate::{
    http::{ApiError, MediaApi},
    model::User,
};

/// Key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "access_token";

/// Owns the bearer token and keeps the persisted copy in sync with it.
///
/// `set_token` is the only way to change the token. Each change to a
/// non-empty token schedules exactly one identity check; a failed check for
/// the token that is still current signs the user out.
pub struct SessionStore {
    token: Option<String>,
    store: Box<dyn KeyValueStore>,
    pending_check: bool,
}

fn normalize(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl SessionStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        let token = normalize(store.get(TOKEN_KEY));
        let pending_check = token.is_some();

        let session = Self {
            token,
            store: Box::new(store),
            pending_check,
        };
        if !pending_check {
            session.persist();
        }
        session
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        let token = normalize(token);
        if token == self.token {
            return;
        }

        self.pending_check = token.is_some();
        self.token = token;
        self.persist();

        if self.token.is_some() {
            info!("Session token updated");
        } else {
            info!("Session cleared");
        }
    }

    fn persist(&self) {
        let result = match &self.token {
            Some(token) => self.store.set(TOKEN_KEY, token),
            None => self.store.remove(TOKEN_KEY),
        };
        if let Err(e) = result {
            warn!("Failed to persist session: {}", e);
        }
    }

    /// Hands out the token that still needs an identity check, once.
    pub fn take_pending_check(&mut self) -> Option<String> {
        if !self.pending_check {
            return None;
        }
        self.pending_check = false;
        self.token.clone()
    }

    pub fn apply_identity_check(&mut self, token: &str, result: Result<User, ApiError>) {
        match result {
            Ok(user) => {
                tracing::debug!("Session valid for user {}", user.id);
            }
            Err(e) => {
                if self.token.as_deref() != Some(token) {
                    tracing::debug!("Ignoring identity check for a replaced token");
                    return;
                }
                warn!("Identity check failed, signing out: {}", e);
                self.set_token(None);
            }
        }
    }

    /// Runs the pending identity check, if any. Returns whether the session is
    /// still authenticated afterwards.
    pub async fn revalidate(&mut self, api: &dyn MediaApi) -> bool {
        if let Some(token) = self.take_pending_check() {
            let result = api.current_user(&token).await;
            self.apply_identity_check(&token, result);
        }
        self.is_authenticated()
    }
}
