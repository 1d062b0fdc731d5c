use super::*;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::credentials::{CredentialRecord, CredentialStoreError, StaticCredentialStore};
use crate::identity::Role;
use crate::storage::{MemoryStorage, StorageError};

fn manager_with(credentials: Arc<dyn CredentialStore>, storage: Arc<dyn SessionStorage>) -> SessionManager {
    SessionManager::new(credentials, storage, MIN_LOGIN_DELAY)
}

fn demo_manager() -> (SessionManager, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), storage.clone());
    manager.restore();
    (manager, storage)
}

fn inactive_leader_store() -> StaticCredentialStore {
    StaticCredentialStore::demo().with_account(
        Identity {
            id: 4,
            username: "lider_inativo".into(),
            full_name: "Ana Inativa".into(),
            email: "ana@videira.com.br".into(),
            role: Role::CellLeader,
            is_active: false,
        },
        "ana123",
    )
}

struct BrokenCredentials;

#[async_trait]
impl CredentialStore for BrokenCredentials {
    async fn lookup(&self, _username: &str) -> Result<Option<CredentialRecord>, CredentialStoreError> {
        Err(CredentialStoreError::Unavailable("directory offline".into()))
    }
}

/// Reads succeed (empty); writes fail.
struct ReadOnlyStorage;

impl SessionStorage for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: "/readonly".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: "/readonly".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

// =============================================================
// Initial state and restore
// =============================================================

#[test]
fn new_manager_starts_restoring_with_no_flags() {
    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), Arc::new(MemoryStorage::new()));
    assert!(manager.is_loading());
    assert_eq!(manager.snapshot().status, SessionStatus::Restoring);
    assert_eq!(manager.role_flags(), RoleFlags::default());
    assert!(manager.current_identity().is_none());
}

#[test]
fn restore_with_empty_storage_is_unauthenticated() {
    let (manager, _) = demo_manager();
    let snap = manager.snapshot();
    assert_eq!(snap.status, SessionStatus::Unauthenticated);
    assert!(snap.identity.is_none());
    assert!(!manager.is_loading());
}

#[test]
fn restore_with_valid_record_authenticates_without_revalidating() {
    // The stored identity is not in the credential store at all.
    let identity = Identity {
        id: 42,
        username: "antigo".into(),
        full_name: "Conta Antiga".into(),
        email: "antigo@videira.com.br".into(),
        role: Role::Discipler,
        is_active: true,
    };
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(STORAGE_KEY, &identity.to_snapshot().unwrap()).unwrap();

    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), storage);
    let snap = manager.restore();
    assert_eq!(snap.status, SessionStatus::Authenticated);
    assert_eq!(snap.identity, Some(identity));
    assert!(manager.is_discipler());
}

#[test]
fn restore_with_malformed_record_clears_storage() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(STORAGE_KEY, "{\"id\": oops").unwrap();

    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), storage.clone());
    let snap = manager.restore();
    assert_eq!(snap.status, SessionStatus::Unauthenticated);
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
}

#[test]
fn restore_with_unknown_role_clears_storage() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set_item(
            STORAGE_KEY,
            r#"{"id":1,"username":"x","full_name":"X","email":"x@x","role":"admin","is_active":true}"#,
        )
        .unwrap();

    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), storage.clone());
    assert_eq!(manager.restore().status, SessionStatus::Unauthenticated);
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
}

#[test]
fn restore_notifies_subscribers() {
    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), Arc::new(MemoryStorage::new()));
    let mut rx = manager.subscribe();
    manager.restore();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().status, SessionStatus::Unauthenticated);
}

#[tokio::test(start_paused = true)]
async fn restore_after_login_keeps_login() {
    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), Arc::new(MemoryStorage::new()));
    manager.login("lider1", "lider123").await.unwrap();

    // Storage now holds lider1 too, but restore must not re-apply anything.
    let snap = manager.restore();
    assert_eq!(snap.status, SessionStatus::Authenticated);
    assert_eq!(snap.identity.unwrap().username, "lider1");
}

// =============================================================
// Login success
// =============================================================

#[tokio::test(start_paused = true)]
async fn login_succeeds_for_every_demo_account() {
    let store = StaticCredentialStore::demo();
    for (username, secret) in [("pastor_admin", "admin123"), ("discipulador1", "disc123"), ("lider1", "lider123")] {
        let (manager, _) = demo_manager();
        let expected = store.lookup(username).await.unwrap().unwrap().identity;
        let identity = manager.login(username, secret).await.unwrap();
        assert_eq!(identity, expected);
        assert_eq!(manager.snapshot().identity, Some(expected));
        assert!(manager.snapshot().is_authenticated());
    }
}

#[tokio::test(start_paused = true)]
async fn login_persists_parseable_snapshot() {
    let (manager, storage) = demo_manager();
    let identity = manager.login("pastor_admin", "admin123").await.unwrap();

    let raw = storage.get_item(STORAGE_KEY).unwrap().unwrap();
    assert_eq!(Identity::from_snapshot(&raw).unwrap(), identity);
}

#[tokio::test(start_paused = true)]
async fn login_as_leader_sets_only_leader_flag() {
    let (manager, _) = demo_manager();
    let identity = manager.login("lider1", "lider123").await.unwrap();
    assert_eq!(identity.role, Role::CellLeader);
    assert!(manager.is_cell_leader());
    assert!(!manager.is_supervising_pastor());
    assert!(!manager.is_discipler());
}

#[tokio::test(start_paused = true)]
async fn login_while_authenticated_overwrites_identity() {
    let (manager, storage) = demo_manager();
    manager.login("lider1", "lider123").await.unwrap();
    manager.login("pastor_admin", "admin123").await.unwrap();

    assert!(manager.is_supervising_pastor());
    let raw = storage.get_item(STORAGE_KEY).unwrap().unwrap();
    assert_eq!(Identity::from_snapshot(&raw).unwrap().username, "pastor_admin");
}

#[tokio::test(start_paused = true)]
async fn login_notifies_subscribers() {
    let (manager, _) = demo_manager();
    let mut rx = manager.subscribe();
    manager.login("discipulador1", "disc123").await.unwrap();
    rx.changed().await.unwrap();
    let snap = rx.borrow().clone();
    assert_eq!(snap.status, SessionStatus::Authenticated);
    assert!(snap.flags().is_discipler);
}

// =============================================================
// Login failures
// =============================================================

#[tokio::test(start_paused = true)]
async fn wrong_secret_is_rejected_and_state_unchanged() {
    let (manager, storage) = demo_manager();
    let err = manager.login("lider1", "wrongpass").await.unwrap_err();
    assert_eq!(err, LoginError::InvalidCredentials);
    assert_eq!(err.to_string(), "Usuário ou senha incorretos");
    assert_eq!(manager.snapshot().status, SessionStatus::Unauthenticated);
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn wrong_secret_keeps_prior_session() {
    let (manager, storage) = demo_manager();
    let pastor = manager.login("pastor_admin", "admin123").await.unwrap();
    let stored_before = storage.get_item(STORAGE_KEY).unwrap();

    assert_eq!(manager.login("lider1", "nope").await, Err(LoginError::InvalidCredentials));
    assert_eq!(manager.current_identity(), Some(pastor));
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), stored_before);
}

#[tokio::test(start_paused = true)]
async fn unknown_username_gets_same_message() {
    let (manager, _) = demo_manager();
    let unknown = manager.login("ninguem", "lider123").await.unwrap_err();
    let wrong = manager.login("lider1", "x").await.unwrap_err();
    assert_eq!(unknown, wrong);
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test(start_paused = true)]
async fn inactive_account_rejected_regardless_of_secret() {
    let storage = Arc::new(MemoryStorage::new());
    let manager = manager_with(Arc::new(inactive_leader_store()), storage.clone());
    manager.restore();

    for secret in ["ana123", "errada"] {
        let err = manager.login("lider_inativo", secret).await.unwrap_err();
        assert_eq!(err, LoginError::Inactive);
        assert!(err.to_string().starts_with("Usuário inativo"));
    }
    assert!(!manager.snapshot().is_authenticated());
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn credential_backend_fault_is_internal() {
    let manager = manager_with(Arc::new(BrokenCredentials), Arc::new(MemoryStorage::new()));
    manager.restore();
    let err = manager.login("lider1", "lider123").await.unwrap_err();
    assert_eq!(err, LoginError::Internal);
    assert_eq!(err.to_string(), "Erro interno. Tente novamente.");
}

#[tokio::test(start_paused = true)]
async fn storage_write_fault_is_internal_and_state_unchanged() {
    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), Arc::new(ReadOnlyStorage));
    manager.restore();
    assert_eq!(manager.login("lider1", "lider123").await, Err(LoginError::Internal));
    assert_eq!(manager.snapshot().status, SessionStatus::Unauthenticated);
    assert!(manager.current_identity().is_none());
}

// =============================================================
// Latency
// =============================================================

#[tokio::test(start_paused = true)]
async fn every_outcome_takes_at_least_one_second() {
    let storage = Arc::new(MemoryStorage::new());
    let manager = manager_with(Arc::new(inactive_leader_store()), storage);
    manager.restore();

    for (username, secret) in [
        ("lider1", "lider123"),
        ("lider1", "wrongpass"),
        ("ninguem", "x"),
        ("lider_inativo", "ana123"),
    ] {
        let started = Instant::now();
        let _ = manager.login(username, secret).await;
        assert!(started.elapsed() >= Duration::from_secs(1), "{username} resolved too fast");
    }
}

#[tokio::test(start_paused = true)]
async fn internal_fault_also_waits() {
    let manager = manager_with(Arc::new(BrokenCredentials), Arc::new(MemoryStorage::new()));
    let started = Instant::now();
    let _ = manager.login("lider1", "lider123").await;
    assert!(started.elapsed() >= MIN_LOGIN_DELAY);
}

#[test]
fn login_delay_cannot_go_below_floor() {
    let manager = SessionManager::new(
        Arc::new(StaticCredentialStore::demo()),
        Arc::new(MemoryStorage::new()),
        Duration::ZERO,
    );
    assert_eq!(manager.login_delay(), MIN_LOGIN_DELAY);

    let slower = SessionManager::new(
        Arc::new(StaticCredentialStore::demo()),
        Arc::new(MemoryStorage::new()),
        Duration::from_secs(3),
    );
    assert_eq!(slower.login_delay(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn state_not_visible_before_delay_elapses() {
    let (manager, _) = demo_manager();
    let pending = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.login("lider1", "lider123").await })
    };

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!manager.snapshot().is_authenticated());

    pending.await.unwrap().unwrap();
    assert!(manager.snapshot().is_authenticated());
}

// =============================================================
// Overlapping logins
// =============================================================

#[tokio::test(start_paused = true)]
async fn overlapping_login_is_rejected() {
    let (manager, _) = demo_manager();
    let started = Instant::now();
    let (first, second) = tokio::join!(
        manager.login("lider1", "lider123"),
        manager.login("pastor_admin", "admin123")
    );

    assert_eq!(first.unwrap().username, "lider1");
    assert_eq!(second, Err(LoginError::InProgress));
    assert!(started.elapsed() >= MIN_LOGIN_DELAY);
    assert!(manager.is_cell_leader());

    // The marker is released once the first attempt resolves.
    manager.login("pastor_admin", "admin123").await.unwrap();
    assert!(manager.is_supervising_pastor());
}

#[tokio::test(start_paused = true)]
async fn cancelled_login_releases_in_flight_marker() {
    let (manager, _) = demo_manager();
    let cut_short = tokio::time::timeout(Duration::from_millis(200), manager.login("lider1", "lider123")).await;
    assert!(cut_short.is_err());
    assert!(!manager.snapshot().is_authenticated());

    manager.login("lider1", "lider123").await.unwrap();
    assert!(manager.is_cell_leader());
}

// =============================================================
// Logout
// =============================================================

#[tokio::test(start_paused = true)]
async fn logout_clears_memory_storage_and_flags() {
    let (manager, storage) = demo_manager();
    manager.login("pastor_admin", "admin123").await.unwrap();
    manager.logout();

    assert_eq!(manager.snapshot().status, SessionStatus::Unauthenticated);
    assert!(manager.current_identity().is_none());
    assert_eq!(manager.role_flags(), RoleFlags::default());
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
}

#[test]
fn logout_when_signed_out_is_harmless() {
    let (manager, _) = demo_manager();
    manager.logout();
    assert_eq!(manager.snapshot().status, SessionStatus::Unauthenticated);
}

#[test]
fn logout_survives_storage_fault() {
    let manager = manager_with(Arc::new(StaticCredentialStore::demo()), Arc::new(ReadOnlyStorage));
    manager.restore();
    manager.logout();
    assert_eq!(manager.snapshot().status, SessionStatus::Unauthenticated);
}

#[tokio::test(start_paused = true)]
async fn logout_during_pending_login_wins() {
    let (manager, storage) = demo_manager();
    manager.restore();

    let pending = tokio::spawn({
        let manager = manager.clone();
        async move { manager.login("lider1", "lider123").await }
    });
    tokio::time::sleep(Duration::from_millis(500)).await;
    manager.logout();

    assert_eq!(pending.await.unwrap(), Err(LoginError::SignedOutMeanwhile));
    assert_eq!(manager.snapshot().status, SessionStatus::Unauthenticated);
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);

    // Later logins are unaffected.
    manager.login("lider1", "lider123").await.unwrap();
    assert!(manager.is_cell_leader());
}

#[tokio::test(start_paused = true)]
async fn logout_before_login_starts_does_not_block_it() {
    let (manager, storage) = demo_manager();
    manager.restore();
    manager.logout();

    manager.login("discipulador1", "disc123").await.unwrap();
    assert!(manager.is_discipler());
    assert!(storage.get_item(STORAGE_KEY).unwrap().is_some());
}
