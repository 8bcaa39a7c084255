use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use campus_catalog::error::CatalogError;
use campus_catalog::usecase::authorize::RoleGate;
use campus_domain::id::UserId;
use campus_domain::user::UserRole;
use campus_testing::auth::{MockAuth, test_tokens};

use crate::helpers::{MockUserRepo, test_user};

fn gate(users: MockUserRepo) -> RoleGate<MockUserRepo> {
    RoleGate {
        users,
        tokens: test_tokens(),
    }
}

// ── authenticate ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_missing_or_non_bearer_header() {
    let gate = gate(MockUserRepo::default());

    assert!(matches!(
        gate.authenticate(None),
        Err(CatalogError::Unauthenticated)
    ));
    assert!(matches!(
        gate.authenticate(Some("Basic dXNlcjpwYXNz")),
        Err(CatalogError::Unauthenticated)
    ));
}

#[tokio::test]
async fn should_authenticate_valid_bearer_without_store_lookup() {
    let gate = gate(MockUserRepo::unavailable());
    let info = gate
        .authenticate(Some(&MockAuth::user(5).bearer()))
        .unwrap();
    assert_eq!(info.subject_id, UserId(5));
}

// ── authorize ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_admit_subject_whose_stored_role_matches() {
    let gate = gate(MockUserRepo::new(vec![test_user(1, UserRole::Admin)]));
    let info = gate
        .authorize(UserRole::Admin, Some(&MockAuth::admin(1).bearer()))
        .await
        .unwrap();
    assert_eq!(info.subject_id, UserId(1));
}

#[tokio::test]
async fn should_forbid_when_token_claims_admin_but_store_says_user() {
    let gate = gate(MockUserRepo::new(vec![test_user(1, UserRole::User)]));
    let result = gate
        .authorize(UserRole::Admin, Some(&MockAuth::admin(1).bearer()))
        .await;
    assert!(
        matches!(result, Err(CatalogError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_admit_promoted_user_holding_old_token() {
    let gate = gate(MockUserRepo::new(vec![test_user(3, UserRole::Admin)]));
    let result = gate
        .authorize(UserRole::Admin, Some(&MockAuth::user(3).bearer()))
        .await;
    assert!(result.is_ok(), "expected Ok, got {result:?}");
}

#[tokio::test]
async fn should_forbid_unknown_subject() {
    let gate = gate(MockUserRepo::default());
    let result = gate
        .authorize(UserRole::Admin, Some(&MockAuth::admin(99).bearer()))
        .await;
    assert!(matches!(result, Err(CatalogError::Forbidden)));
}

#[tokio::test]
async fn should_surface_store_failure_as_internal() {
    let gate = gate(MockUserRepo::unavailable());
    let result = gate
        .authorize(UserRole::Admin, Some(&MockAuth::admin(1).bearer()))
        .await;
    assert!(matches!(result, Err(CatalogError::Internal(_))));
}

// ── require_role ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_run_operation_when_forbidden() {
    let ran = Arc::new(AtomicBool::new(false));
    let gate = gate(MockUserRepo::new(vec![test_user(2, UserRole::User)]));

    let flag = ran.clone();
    let result = gate
        .require_role(
            UserRole::Admin,
            Some(&MockAuth::admin(2).bearer()),
            |_| async move {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;

    assert!(matches!(result, Err(CatalogError::Forbidden)));
    assert!(!ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn should_pass_verified_identity_to_operation() {
    let gate = gate(MockUserRepo::new(vec![test_user(4, UserRole::Admin)]));
    let subject = gate
        .require_role(
            UserRole::Admin,
            Some(&MockAuth::admin(4).bearer()),
            |info| async move { Ok(info.subject_id) },
        )
        .await
        .unwrap();
    assert_eq!(subject, UserId(4));
}
