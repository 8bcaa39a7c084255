use std::time::Duration;

use campus_catalog::error::CatalogError;
use campus_catalog::usecase::authorize::RoleGate;
use campus_catalog::usecase::user::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, SetRoleUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};
use campus_domain::id::UserId;
use campus_domain::user::UserRole;
use campus_testing::auth::test_tokens;

use crate::helpers::{MockUserRepo, test_user};

fn register(repo: &MockUserRepo, admin_emails: &[&str]) -> RegisterUseCase<MockUserRepo> {
    RegisterUseCase {
        repo: repo.clone(),
        admin_emails: admin_emails.iter().map(|e| e.to_string()).collect(),
    }
}

fn login(repo: &MockUserRepo) -> LoginUseCase<MockUserRepo> {
    LoginUseCase {
        repo: repo.clone(),
        tokens: test_tokens(),
        ttl: Duration::from_secs(3600),
    }
}

fn input(name: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        name: name.into(),
        email: email.into(),
        password: password.into(),
    }
}

// ── register / login ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_for_registered_subject() {
    let repo = MockUserRepo::default();
    let id = register(&repo, &[])
        .execute(input("Ana", "ana@x.com", "s3cret"))
        .await
        .unwrap();

    let output = login(&repo)
        .execute(LoginInput {
            email: "ana@x.com".into(),
            password: "s3cret".into(),
        })
        .await
        .unwrap();
    assert_eq!(output.user_id, id);

    let info = test_tokens().verify(&output.token.token).unwrap();
    assert_eq!(info.subject_id, id);
    assert_eq!(info.role, Some(UserRole::User));
    assert_eq!(info.email.as_deref(), Some("ana@x.com"));
}

#[tokio::test]
async fn should_store_password_as_hash() {
    let repo = MockUserRepo::default();
    register(&repo, &[])
        .execute(input("Ana", "ana@x.com", "s3cret"))
        .await
        .unwrap();

    let hash = repo.users.lock().unwrap()[0].password_hash.clone();
    assert_ne!(hash, "s3cret");
    assert!(hash.starts_with("$argon2"));
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_email_alike() {
    let repo = MockUserRepo::default();
    register(&repo, &[])
        .execute(input("Ana", "ana@x.com", "s3cret"))
        .await
        .unwrap();

    let wrong = login(&repo)
        .execute(LoginInput {
            email: "ana@x.com".into(),
            password: "guess".into(),
        })
        .await;
    let unknown = login(&repo)
        .execute(LoginInput {
            email: "bob@x.com".into(),
            password: "s3cret".into(),
        })
        .await;

    assert!(matches!(wrong, Err(CatalogError::InvalidCredentials)));
    assert!(matches!(unknown, Err(CatalogError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let repo = MockUserRepo::default();
    let usecase = register(&repo, &[]);
    usecase
        .execute(input("Ana", "ana@x.com", "s3cret"))
        .await
        .unwrap();

    let result = usecase.execute(input("Ana 2", "ana@x.com", "other")).await;
    assert!(matches!(result, Err(CatalogError::EmailTaken)));
}

#[tokio::test]
async fn should_validate_registration_fields() {
    let usecase = register(&MockUserRepo::default(), &[]);

    let blank_name = usecase.execute(input("  ", "ana@x.com", "pw")).await;
    let no_password = usecase.execute(input("Ana", "ana@x.com", "")).await;
    let bad_email = usecase.execute(input("Ana", "ana@x", "pw")).await;
    let upper_email = usecase.execute(input("Ana", "Ana@X.com", "pw")).await;

    assert!(matches!(blank_name, Err(CatalogError::MissingData)));
    assert!(matches!(no_password, Err(CatalogError::MissingData)));
    assert!(matches!(bad_email, Err(CatalogError::InvalidEmail)));
    assert!(matches!(upper_email, Err(CatalogError::InvalidEmail)));
}

#[tokio::test]
async fn should_grant_admin_to_configured_email_only() {
    let repo = MockUserRepo::default();
    let usecase = register(&repo, &["root@x.com"]);
    let admin = usecase
        .execute(input("Root", "root@x.com", "pw"))
        .await
        .unwrap();
    let user = usecase
        .execute(input("Ana", "ana@x.com", "pw"))
        .await
        .unwrap();

    let users = repo.users.lock().unwrap().clone();
    let role_of = |id: UserId| users.iter().find(|u| u.id == id).unwrap().role;
    assert_eq!(role_of(admin), UserRole::Admin);
    assert_eq!(role_of(user), UserRole::User);
}

// ── role changes ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_demoted_admin_holding_admin_token() {
    let repo = MockUserRepo::default();
    let id = register(&repo, &["root@x.com"])
        .execute(input("Root", "root@x.com", "pw"))
        .await
        .unwrap();
    let token = login(&repo)
        .execute(LoginInput {
            email: "root@x.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap()
        .token
        .token;

    SetRoleUseCase { repo: repo.clone() }
        .execute(id, UserRole::User)
        .await
        .unwrap();

    let gate = RoleGate {
        users: repo,
        tokens: test_tokens(),
    };
    let result = gate
        .authorize(UserRole::Admin, Some(&format!("Bearer {token}")))
        .await;
    assert!(matches!(result, Err(CatalogError::Forbidden)));
}

#[tokio::test]
async fn should_report_missing_user_on_role_change() {
    let result = SetRoleUseCase {
        repo: MockUserRepo::default(),
    }
    .execute(UserId(404), UserRole::Admin)
    .await;
    assert!(matches!(result, Err(CatalogError::UserNotFound)));
}

// ── update profile ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_own_profile_fields() {
    let repo = MockUserRepo::new(vec![test_user(1, UserRole::User)]);
    UpdateProfileUseCase { repo: repo.clone() }
        .execute(
            UserId(1),
            UpdateProfileInput {
                name: Some(" Ana ".into()),
                email: None,
            },
        )
        .await
        .unwrap();

    let user = repo.users.lock().unwrap()[0].clone();
    assert_eq!(user.name, "Ana");
    assert_eq!(user.email, "user1@x.com");
}

#[tokio::test]
async fn should_reject_empty_profile_update() {
    let usecase = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![test_user(1, UserRole::User)]),
    };
    let result = usecase
        .execute(
            UserId(1),
            UpdateProfileInput {
                name: None,
                email: None,
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::MissingData)));
}

#[tokio::test]
async fn should_reject_profile_email_owned_by_someone_else() {
    let usecase = UpdateProfileUseCase {
        repo: MockUserRepo::new(vec![
            test_user(1, UserRole::User),
            test_user(2, UserRole::User),
        ]),
    };
    let result = usecase
        .execute(
            UserId(1),
            UpdateProfileInput {
                name: None,
                email: Some("user2@x.com".into()),
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::EmailTaken)));
}
