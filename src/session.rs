//! Session manager: login/logout lifecycle and persisted session restore.
//!
//! ARCHITECTURE
//! ============
//! One `SessionManager` is built per process and handed to whatever needs it
//! (cloning shares the same session). The current `SessionSnapshot` lives in a
//! `watch` channel so front ends can either poll `snapshot()` or `subscribe()`
//! to transitions.
//!
//! ```text
//! Restoring --restore(stored ok)--> Authenticated
//! Restoring --restore(empty/bad)--> Unauthenticated
//! Unauthenticated --login ok--> Authenticated --logout--> Unauthenticated
//! ```
//!
//! TRADE-OFFS
//! ==========
//! Every login attempt resolves no sooner than `MIN_LOGIN_DELAY`, whatever the
//! outcome. Overlapping attempts are rejected rather than raced: the second
//! caller gets `LoginError::InProgress` and state is left to the first. A
//! `logout()` issued while a login is pending wins: the pending login fails
//! with `LoginError::SignedOutMeanwhile` and writes nothing.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::authz::RoleFlags;
use crate::credentials::CredentialStore;
use crate::identity::Identity;
use crate::storage::SessionStorage;

/// Durable storage slot holding the serialized current identity.
pub const STORAGE_KEY: &str = "radicalLivres_user";

/// Floor on login latency, applied to successes and failures alike.
pub const MIN_LOGIN_DELAY: Duration = Duration::from_secs(1);

// =============================================================================
// SNAPSHOT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Restoring,
    Authenticated,
    Unauthenticated,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub identity: Option<Identity>,
}

impl SessionSnapshot {
    fn restoring() -> Self {
        Self { status: SessionStatus::Restoring, identity: None }
    }

    fn signed_out() -> Self {
        Self { status: SessionStatus::Unauthenticated, identity: None }
    }

    fn signed_in(identity: Identity) -> Self {
        Self { status: SessionStatus::Authenticated, identity: Some(identity) }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Restoring
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    #[must_use]
    pub fn flags(&self) -> RoleFlags {
        RoleFlags::for_identity(self.identity.as_ref())
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Login failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Usuário ou senha incorretos")]
    InvalidCredentials,
    #[error("Usuário inativo. Entre em contato com o administrador.")]
    Inactive,
    #[error("Já existe um login em andamento. Aguarde.")]
    InProgress,
    #[error("Erro interno. Tente novamente.")]
    Internal,
    #[error("A sessão foi encerrada durante o login. Entre novamente.")]
    SignedOutMeanwhile,
}

// =============================================================================
// SESSION MANAGER
// =============================================================================

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

struct Inner {
    credentials: Arc<dyn CredentialStore>,
    storage: Arc<dyn SessionStorage>,
    login_delay: Duration,
    state: watch::Sender<SessionSnapshot>,
    login_in_flight: AtomicBool,
    /// Bumped by every `logout()`; a login commits only if it is unchanged.
    logout_generation: AtomicU64,
}

impl SessionManager {
    /// Build a manager in the `Restoring` state. `login_delay` below
    /// `MIN_LOGIN_DELAY` is raised to it.
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>, storage: Arc<dyn SessionStorage>, login_delay: Duration) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::restoring());
        Self {
            inner: Arc::new(Inner {
                credentials,
                storage,
                login_delay: login_delay.max(MIN_LOGIN_DELAY),
                state,
                login_in_flight: AtomicBool::new(false),
                logout_generation: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every session transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.inner.state.borrow().identity.clone()
    }

    #[must_use]
    pub fn role_flags(&self) -> RoleFlags {
        self.inner.state.borrow().flags()
    }

    #[must_use]
    pub fn is_supervising_pastor(&self) -> bool {
        self.role_flags().is_supervising_pastor
    }

    #[must_use]
    pub fn is_discipler(&self) -> bool {
        self.role_flags().is_discipler
    }

    #[must_use]
    pub fn is_cell_leader(&self) -> bool {
        self.role_flags().is_cell_leader
    }

    #[must_use]
    pub fn login_delay(&self) -> Duration {
        self.inner.login_delay
    }

    /// Leave `Restoring` using whatever durable storage holds.
    ///
    /// A stored record that fails to parse is removed so the next start does
    /// not trip over it again. Has no effect once the session has left
    /// `Restoring` (e.g. a login already completed).
    pub fn restore(&self) -> SessionSnapshot {
        let restored = match self.inner.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => match Identity::from_snapshot(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    warn!(error = %e, "discarding unreadable stored session");
                    if let Err(e) = self.inner.storage.remove_item(STORAGE_KEY) {
                        warn!(error = %e, "failed to clear stored session");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "session storage unavailable; starting signed out");
                None
            }
        };

        let applied = self.inner.state.send_if_modified(|snap| {
            if snap.status != SessionStatus::Restoring {
                return false;
            }
            *snap = match restored {
                Some(identity) => SessionSnapshot::signed_in(identity),
                None => SessionSnapshot::signed_out(),
            };
            true
        });

        let snap = self.snapshot();
        if applied {
            info!(
                status = ?snap.status,
                username = snap.identity.as_ref().map(|i| i.username.as_str()),
                "session restored"
            );
        }
        snap
    }

    /// Validate credentials and, on success, make the identity current and
    /// persist it.
    ///
    /// Resolves after at least `login_delay`. A failure leaves both the
    /// in-memory session and durable storage untouched.
    ///
    /// # Errors
    ///
    /// Returns the `LoginError` whose message should be shown to the user.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, LoginError> {
        let Some(_guard) = InFlight::acquire(&self.inner.login_in_flight) else {
            tokio::time::sleep(self.inner.login_delay).await;
            warn!(%username, "login rejected: another attempt is in flight");
            return Err(LoginError::InProgress);
        };

        let generation = self.inner.logout_generation.load(Ordering::Acquire);
        let (verdict, ()) = tokio::join!(
            self.verify(username, password),
            tokio::time::sleep(self.inner.login_delay)
        );

        match verdict.and_then(|identity| self.commit(identity, generation)) {
            Ok(identity) => {
                info!(%username, role = %identity.role, "login succeeded");
                Ok(identity)
            }
            Err(e) => {
                info!(%username, reason = ?e, "login failed");
                Err(e)
            }
        }
    }

    /// Clear the current identity and its stored copy. Never fails; a storage
    /// fault is logged and the in-memory session is still cleared.
    ///
    /// Runs under the state channel's write lock, so a pending login's commit
    /// either lands before it or observes the bumped generation and backs off.
    pub fn logout(&self) {
        let mut previous = None;
        self.inner.state.send_modify(|snap| {
            self.inner.logout_generation.fetch_add(1, Ordering::AcqRel);
            if let Err(e) = self.inner.storage.remove_item(STORAGE_KEY) {
                warn!(error = %e, "failed to remove stored session on logout");
            }
            previous = std::mem::replace(snap, SessionSnapshot::signed_out()).identity;
        });
        info!(username = previous.as_ref().map(|i| i.username.as_str()), "signed out");
    }

    async fn verify(&self, username: &str, password: &str) -> Result<Identity, LoginError> {
        let record = match self.inner.credentials.lookup(username).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(LoginError::InvalidCredentials),
            Err(e) => {
                error!(error = %e, "credential lookup failed");
                return Err(LoginError::Internal);
            }
        };
        if !record.identity.is_active {
            return Err(LoginError::Inactive);
        }
        if !record.matches(password) {
            return Err(LoginError::InvalidCredentials);
        }
        Ok(record.identity)
    }

    /// Persist and publish `identity` unless a logout happened after `generation`
    /// was read.
    fn commit(&self, identity: Identity, generation: u64) -> Result<Identity, LoginError> {
        let raw = identity.to_snapshot().map_err(|e| {
            error!(error = %e, "failed to encode session");
            LoginError::Internal
        })?;
        let mut outcome = Err(LoginError::SignedOutMeanwhile);
        self.inner.state.send_if_modified(|snap| {
            if self.inner.logout_generation.load(Ordering::Acquire) != generation {
                return false;
            }
            if let Err(e) = self.inner.storage.set_item(STORAGE_KEY, &raw) {
                error!(error = %e, "failed to persist session");
                outcome = Err(LoginError::Internal);
                return false;
            }
            *snap = SessionSnapshot::signed_in(identity.clone());
            outcome = Ok(());
            true
        });
        outcome.map(|()| identity)
    }
}

/// Marks a login as in flight; released on drop, including when the login
/// future is cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
