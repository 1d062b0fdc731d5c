use super::*;

// =============================================================
// Secret digests
// =============================================================

#[test]
fn hash_secret_is_hex_sha256() {
    let digest = hash_secret("admin123");
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(digest, hash_secret("admin123"));
    assert_ne!(digest, hash_secret("admin124"));
}

#[test]
fn record_matches_only_its_secret() {
    let store = StaticCredentialStore::demo();
    let record = store.records.get("lider1").unwrap();
    assert!(record.matches("lider123"));
    assert!(!record.matches("LIDER123"));
    assert!(!record.matches(""));
}

// =============================================================
// Demo store
// =============================================================

#[tokio::test]
async fn demo_store_has_one_account_per_role() {
    let store = StaticCredentialStore::demo();
    let roles: Vec<Role> = store.identities().iter().map(|i| i.role).collect();
    assert_eq!(roles, vec![Role::SupervisingPastor, Role::Discipler, Role::CellLeader]);
    assert!(store.identities().iter().all(|i| i.is_active));
}

#[tokio::test]
async fn lookup_finds_known_username() {
    let store = StaticCredentialStore::demo();
    let record = store.lookup("discipulador1").await.unwrap().unwrap();
    assert_eq!(record.identity.id, 2);
    assert_eq!(record.identity.full_name, "João Discipulador");
    assert!(record.matches("disc123"));
}

#[tokio::test]
async fn lookup_is_exact_match() {
    let store = StaticCredentialStore::demo();
    assert!(store.lookup("Lider1").await.unwrap().is_none());
    assert!(store.lookup(" lider1").await.unwrap().is_none());
    assert!(store.lookup("ninguem").await.unwrap().is_none());
}

#[tokio::test]
async fn with_account_replaces_existing_username() {
    let mut identity = StaticCredentialStore::demo().lookup("lider1").await.unwrap().unwrap().identity;
    identity.is_active = false;
    let store = StaticCredentialStore::demo().with_account(identity, "novo");
    let record = store.lookup("lider1").await.unwrap().unwrap();
    assert!(!record.identity.is_active);
    assert!(record.matches("novo"));
    assert!(!record.matches("lider123"));
}
