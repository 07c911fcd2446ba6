//! Tests for the account service.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCredentialStore, MockPasswordHasher};
use crate::domain::{Email, ErrorCode};

#[fixture]
fn credentials() -> Credentials {
    Credentials::for_registration("student@campus.edu", "correct horse").expect("valid")
}

fn stored(credentials: &Credentials) -> Account {
    Account {
        id: UserId::random(),
        email: credentials.email().clone(),
        password_hash: "hash".to_owned(),
        created_at: Utc::now(),
    }
}

fn hasher(matches: bool) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().returning(|_| Ok("hash".to_owned()));
    hasher.expect_verify().returning(move |_, _| Ok(matches));
    hasher
}

fn service(store: MockCredentialStore, hasher: MockPasswordHasher) -> AccountService<MockCredentialStore> {
    AccountService::new(Arc::new(store), Arc::new(hasher))
}

#[rstest]
#[tokio::test]
async fn register_hashes_and_stores(credentials: Credentials) {
    let mut store = MockCredentialStore::new();
    store.expect_find_by_email().return_once(|_| Ok(None));
    store
        .expect_insert()
        .times(1)
        .withf(|account: &Account| {
            account.email.as_ref() == "student@campus.edu" && account.password_hash == "hash"
        })
        .return_once(|_| Ok(()));

    let account = service(store, hasher(true))
        .register(&credentials)
        .await
        .expect("registration succeeds");

    assert_eq!(account.email, Email::new("student@campus.edu").expect("valid"));
}

#[rstest]
#[tokio::test]
async fn register_stores_nothing_when_hashing_fails(credentials: Credentials) {
    let mut store = MockCredentialStore::new();
    store.expect_find_by_email().return_once(|_| Ok(None));
    store.expect_insert().never();
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHasherError::derivation("bad key")));

    let error = service(store, hasher)
        .register(&credentials)
        .await
        .expect_err("hashing failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn register_rejects_known_email(credentials: Credentials) {
    let existing = stored(&credentials);
    let mut store = MockCredentialStore::new();
    store
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(existing)));
    store.expect_insert().never();

    let error = service(store, hasher(true))
        .register(&credentials)
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn register_maps_insert_race_to_conflict(credentials: Credentials) {
    let mut store = MockCredentialStore::new();
    store.expect_find_by_email().return_once(|_| Ok(None));
    store
        .expect_insert()
        .return_once(|_| Err(CredentialStoreError::duplicate("student@campus.edu")));

    let error = service(store, hasher(true))
        .register(&credentials)
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn verify_checks_password(
    credentials: Credentials,
    #[case] matches: bool,
    #[case] expected_error: Option<ErrorCode>,
) {
    let existing = stored(&credentials);
    let mut store = MockCredentialStore::new();
    store
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(existing)));

    let result = service(store, hasher(matches)).verify(&credentials).await;

    assert_eq!(result.err().map(|e| e.code()), expected_error);
}

#[rstest]
#[tokio::test]
async fn verify_hides_unknown_email(credentials: Credentials) {
    let mut store = MockCredentialStore::new();
    store.expect_find_by_email().return_once(|_| Ok(None));

    let error = service(store, hasher(true))
        .verify(&credentials)
        .await
        .expect_err("unknown email");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), INVALID_CREDENTIALS);
}

#[rstest]
#[case(CredentialStoreError::connection("refused"), "refused")]
#[case(CredentialStoreError::query("syntax"), "syntax")]
#[tokio::test]
async fn store_failures_surface_with_their_text(
    credentials: Credentials,
    #[case] failure: CredentialStoreError,
    #[case] underlying: &str,
) {
    let mut store = MockCredentialStore::new();
    store.expect_find_by_email().return_once(move |_| Err(failure));

    let error = service(store, hasher(true))
        .verify(&credentials)
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), ErrorCode::StorageError);
    assert!(error.message().contains(underlying));
}

#[rstest]
#[tokio::test]
async fn profile_of_missing_account_is_unauthorized() {
    let mut store = MockCredentialStore::new();
    store.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(store, hasher(true))
        .profile(&UserId::random())
        .await
        .expect_err("missing account");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}
