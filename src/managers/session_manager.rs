//! Session Manager for Pinmark.
//!
//! Holds the auth token and current user, mirrored into durable storage under
//! `authToken` and `currentUser` so a restart picks the session back up.
//! Expiry is never tracked here; a 401 from the API is the only signal.

use std::sync::Arc;

use tracing::{info, warn};

use crate::database::kv_store::{DurableStore, AUTH_TOKEN_KEY, CURRENT_USER_KEY};
use crate::types::errors::SessionError;
use crate::types::session::{Session, User};

/// Trait defining session store operations.
pub trait SessionManagerTrait {
    fn load(&mut self) -> Result<&Session, SessionError>;
    fn set(&mut self, token: &str, user: &User) -> Result<(), SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;
    fn current(&self) -> &Session;
}

/// Session store backed by a [`DurableStore`].
pub struct SessionManager {
    store: Arc<dyn DurableStore>,
    session: Session,
}

impl SessionManager {
    /// Creates an anonymous manager; call [`SessionManagerTrait::load`] to restore.
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self {
            store,
            session: Session::Anonymous,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Reads both keys; anything short of a token plus a parseable user is anonymous.
    fn read_stored(&self) -> Result<Option<(String, User)>, SessionError> {
        let token = self.store.get(AUTH_TOKEN_KEY)?.filter(|t| !t.is_empty());
        let user_json = self.store.get(CURRENT_USER_KEY)?;

        match (token, user_json) {
            (Some(token), Some(json)) => match serde_json::from_str::<Option<User>>(&json) {
                Ok(Some(user)) => Ok(Some((token, user))),
                Ok(None) => Ok(None),
                Err(e) => {
                    warn!(error = %e, "stored user is not valid JSON");
                    Ok(None)
                }
            },
            _ => Ok(None),
        }
    }
}

impl SessionManagerTrait for SessionManager {
    /// Restores the session from storage.
    ///
    /// A half-written state (only one key, or an unreadable user) loads as
    /// anonymous and the leftover keys are removed.
    fn load(&mut self) -> Result<&Session, SessionError> {
        match self.read_stored()? {
            Some((token, user)) => {
                info!(user_id = user.id, "restored stored session");
                self.session = Session::Authenticated { token, user };
            }
            None => {
                self.store.remove_many(&[AUTH_TOKEN_KEY, CURRENT_USER_KEY])?;
                self.session = Session::Anonymous;
            }
        }
        Ok(&self.session)
    }

    /// Persists token and user together, then updates the in-memory copy.
    fn set(&mut self, token: &str, user: &User) -> Result<(), SessionError> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| SessionError::SerializationError(e.to_string()))?;

        self.store
            .set_many(&[(AUTH_TOKEN_KEY, token), (CURRENT_USER_KEY, &user_json)])?;

        info!(user_id = user.id, "session established");
        self.session = Session::Authenticated {
            token: token.to_string(),
            user: user.clone(),
        };
        Ok(())
    }

    /// Removes both keys and resets to anonymous.
    ///
    /// Memory is reset even when storage fails, so a rejected token is never reused.
    fn clear(&mut self) -> Result<(), SessionError> {
        self.session = Session::Anonymous;
        self.store.remove_many(&[AUTH_TOKEN_KEY, CURRENT_USER_KEY])?;
        info!("session cleared");
        Ok(())
    }

    fn current(&self) -> &Session {
        &self.session
    }
}
