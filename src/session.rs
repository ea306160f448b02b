//! Explicit session context replacing a global auth store.
//!
//! Lifecycle: [`Session::init`] reads the persisted token,
//! [`Session::authenticate`] stores a new token and loads the profile,
//! [`Session::clear`] drops both and evicts the persisted copy.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiClient, ApiTransport};
use crate::error::ClientError;
use crate::types::UserRecord;

/// Persistent token storage (browser local storage in the web UI).
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn evict(&self);
}

/// In-memory store; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(token.to_string()))) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_string());
    }

    fn evict(&self) {
        *self.slot.borrow_mut() = None;
    }
}

#[derive(Debug, Clone)]
pub struct Session<S> {
    store: S,
    token: Option<String>,
    profile: Option<UserRecord>,
}

impl<S: TokenStore> Session<S> {
    pub fn init(store: S) -> Self {
        let token = store.load().filter(|t| !t.trim().is_empty());
        Self { store, token, profile: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn profile(&self) -> Option<&UserRecord> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.profile.as_ref().map(|p| p.is_staff).unwrap_or(false)
    }

    /// Store a new token; any profile of a previous token is dropped.
    pub fn set_token(&mut self, token: &str) {
        self.store.save(token);
        self.token = Some(token.to_string());
        self.profile = None;
    }

    pub fn set_profile(&mut self, profile: UserRecord) {
        self.profile = Some(profile);
    }

    pub fn client<T: ApiTransport>(&self, transport: T, base: &str) -> ApiClient<T> {
        ApiClient::new(transport, base, self.token.clone())
    }

    /// Store `token` and fetch the profile it belongs to.
    ///
    /// A rejected token (401) clears the session; other failures keep the
    /// token so the profile can be fetched again later.
    pub async fn authenticate<T: ApiTransport>(
        &mut self,
        transport: T,
        base: &str,
        token: &str,
    ) -> Result<(), ClientError> {
        self.set_token(token);
        self.refresh_profile(transport, base).await
    }

    /// Re-fetch the profile for the current token (e.g. after a reload).
    pub async fn refresh_profile<T: ApiTransport>(&mut self, transport: T, base: &str) -> Result<(), ClientError> {
        let Some(token) = self.token.clone() else {
            return Err(ClientError::Unauthorized);
        };
        let fetched = fetch_profile(transport, base, &token).await;
        self.apply_profile(&token, fetched)
    }

    /// Record the outcome of a profile fetch made with `token`.
    ///
    /// The session may have changed while the request was in flight. When it
    /// no longer holds `token` (signed out, or signed in again) nothing is
    /// applied. Otherwise a profile is stored, a 401 clears the session and
    /// other failures keep the token.
    pub fn apply_profile(
        &mut self,
        token: &str,
        fetched: Result<UserRecord, ClientError>,
    ) -> Result<(), ClientError> {
        if self.token.as_deref() != Some(token) {
            tracing::debug!("session changed during profile fetch, result dropped");
            return fetched.map(|_| ());
        }
        match fetched {
            Ok(profile) => {
                tracing::debug!(user = profile.id, "session profile loaded");
                self.profile = Some(profile);
                Ok(())
            }
            Err(ClientError::Unauthorized) => {
                tracing::info!("stored token rejected, clearing session");
                self.clear();
                Err(ClientError::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    pub fn clear(&mut self) {
        self.store.evict();
        self.token = None;
        self.profile = None;
    }
}

/// `GET /auth/me/` with an explicit token, independent of any session.
/// Pair with [`Session::apply_profile`] when the session cannot be borrowed
/// across the request.
pub async fn fetch_profile<T: ApiTransport>(transport: T, base: &str, token: &str) -> Result<UserRecord, ClientError> {
    ApiClient::new(transport, base, Some(token.to_string())).me().await
}
