//! Mock identities for integration tests.
//!
//! Signs real tokens with [`TEST_SECRET`], so the code under test runs its
//! normal verification path.

use std::time::Duration;

use campus_auth_types::token::TokenService;
use campus_domain::id::UserId;
use campus_domain::user::UserRole;

/// Signing key shared by every test `TokenService`.
pub const TEST_SECRET: &str = "campus-test-secret";

/// Token service keyed with [`TEST_SECRET`].
pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET)
}

/// Identity a test request claims to be.
pub struct MockAuth {
    pub subject_id: UserId,
    /// Role embedded in the token. The stored role may differ.
    pub role: Option<UserRole>,
}

impl MockAuth {
    pub fn new(subject_id: i64, role: Option<UserRole>) -> Self {
        Self {
            subject_id: UserId(subject_id),
            role,
        }
    }

    pub fn user(subject_id: i64) -> Self {
        Self::new(subject_id, Some(UserRole::User))
    }

    pub fn admin(subject_id: i64) -> Self {
        Self::new(subject_id, Some(UserRole::Admin))
    }

    /// Raw signed token valid for one hour.
    pub fn token(&self) -> String {
        test_tokens()
            .issue(self.subject_id, self.role, None, Duration::from_secs(3600))
            .expect("sign test token")
            .token
    }

    /// `Authorization` header value, e.g. `Bearer eyJ...`.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }
}
