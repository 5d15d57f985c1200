//! Credential store collaborator.
//!
//! The security pipeline treats authentication as an opaque lookup:
//! username + password in, optional identity out. Implementations are
//! expected to be injection-safe (parameterized queries or equivalent);
//! the pipeline does not sanitize credentials on their behalf.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Authenticated principal returned by a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// Failure talking to the credential store, distinct from a rejected
/// login (that is `Ok(None)`).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Opaque credential lookup.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, AuthError>;
}

/// In-memory credential store for demos and tests.
#[derive(Debug, Default)]
pub struct MemoryAuthenticator {
    users: HashMap<String, String>,
}

impl MemoryAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with the demo accounts.
    pub fn with_demo_users() -> Self {
        let mut store = Self::new();
        store.insert("admin", "password");
        store.insert("user", "pass");
        store
    }

    pub fn insert(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.users.insert(username.into(), password.into());
    }
}

#[async_trait]
impl Authenticator for MemoryAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, AuthError> {
        let identity = self
            .users
            .get(username)
            .filter(|stored| stored.as_str() == password)
            .map(|_| Identity {
                username: username.to_string(),
            });
        Ok(identity)
    }
}
