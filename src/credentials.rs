//! Credential store: username to profile and secret lookup used by login.
//!
//! DESIGN
//! ======
//! `CredentialStore` is the seam a real identity provider plugs into. The
//! bundled `StaticCredentialStore` carries the three demonstration accounts
//! and keeps only SHA-256 digests of their secrets in memory.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::identity::{Identity, Role};

#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    #[error("credential backend unavailable: {0}")]
    Unavailable(String),
}

/// A stored account: the profile plus a digest of its secret.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub identity: Identity,
    secret_digest: String,
}

impl CredentialRecord {
    #[must_use]
    pub fn new(identity: Identity, secret: &str) -> Self {
        Self { identity, secret_digest: hash_secret(secret) }
    }

    /// Compare a submitted secret against the stored digest.
    #[must_use]
    pub fn matches(&self, secret: &str) -> bool {
        hash_secret(secret) == self.secret_digest
    }
}

#[must_use]
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

/// Source of accounts for login validation.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an account by exact username. `Ok(None)` when it does not exist.
    async fn lookup(&self, username: &str) -> Result<Option<CredentialRecord>, CredentialStoreError>;
}

// =============================================================================
// STATIC STORE
// =============================================================================

/// Fixed in-memory set of accounts.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    records: HashMap<String, CredentialRecord>,
}

impl StaticCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The demonstration accounts, one per role.
    #[must_use]
    pub fn demo() -> Self {
        Self::new()
            .with_account(
                Identity {
                    id: 1,
                    username: "pastor_admin".into(),
                    full_name: "Pastor Administrador".into(),
                    email: "admin@videira.com.br".into(),
                    role: Role::SupervisingPastor,
                    is_active: true,
                },
                "admin123",
            )
            .with_account(
                Identity {
                    id: 2,
                    username: "discipulador1".into(),
                    full_name: "João Discipulador".into(),
                    email: "joao@videira.com.br".into(),
                    role: Role::Discipler,
                    is_active: true,
                },
                "disc123",
            )
            .with_account(
                Identity {
                    id: 3,
                    username: "lider1".into(),
                    full_name: "Pedro Líder".into(),
                    email: "pedro@videira.com.br".into(),
                    role: Role::CellLeader,
                    is_active: true,
                },
                "lider123",
            )
    }

    /// Add or replace an account keyed by its username.
    #[must_use]
    pub fn with_account(mut self, identity: Identity, secret: &str) -> Self {
        self.records
            .insert(identity.username.clone(), CredentialRecord::new(identity, secret));
        self
    }

    /// Accounts sorted by id, for listing test credentials.
    #[must_use]
    pub fn identities(&self) -> Vec<&Identity> {
        let mut all: Vec<&Identity> = self.records.values().map(|r| &r.identity).collect();
        all.sort_by_key(|i| i.id);
        all
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn lookup(&self, username: &str) -> Result<Option<CredentialRecord>, CredentialStoreError> {
        Ok(self.records.get(username).cloned())
    }
}
