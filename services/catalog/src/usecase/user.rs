use std::time::Duration;

use campus_auth_types::token::{IssuedToken, TokenService};
use campus_domain::id::UserId;
use campus_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User, validate_email};
use crate::error::CatalogError;
use crate::infra::password::{hash_password, verify_password};

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
    /// Emails granted `admin` on registration.
    pub admin_emails: Vec<String>,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<UserId, CatalogError> {
        let name = input.name.trim();
        if name.is_empty() || input.email.is_empty() || input.password.is_empty() {
            return Err(CatalogError::MissingData);
        }
        if !validate_email(&input.email) {
            return Err(CatalogError::InvalidEmail);
        }
        let role = if self.admin_emails.iter().any(|e| e == &input.email) {
            UserRole::Admin
        } else {
            UserRole::User
        };
        let password_hash = hash_password(input.password).await?;
        let id = self
            .repo
            .create(&NewUser {
                name: name.to_owned(),
                email: input.email,
                password_hash,
                role,
            })
            .await?;
        tracing::info!(user_id = %id, role = %role, "user registered");
        Ok(id)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub user_id: UserId,
    pub token: IssuedToken,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub tokens: TokenService,
    pub ttl: Duration,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, CatalogError> {
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(CatalogError::InvalidCredentials)?;
        if !verify_password(input.password, user.password_hash.clone()).await? {
            return Err(CatalogError::InvalidCredentials);
        }
        let token = self
            .tokens
            .issue(user.id, Some(user.role), Some(&user.email), self.ttl)?;
        Ok(LoginOutput {
            user_id: user.id,
            token,
        })
    }
}

// ── GetUser / ListUsers ──────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: UserId) -> Result<User, CatalogError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::UserNotFound)
    }
}

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, CatalogError> {
        self.repo.list().await
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(&self, id: UserId, input: UpdateProfileInput) -> Result<(), CatalogError> {
        let name = input.name.as_deref().map(str::trim);
        if name.is_none() && input.email.is_none() {
            return Err(CatalogError::MissingData);
        }
        if name.is_some_and(str::is_empty) {
            return Err(CatalogError::MissingData);
        }
        if let Some(ref email) = input.email {
            if !validate_email(email) {
                return Err(CatalogError::InvalidEmail);
            }
        }
        if !self
            .repo
            .update_profile(id, name, input.email.as_deref())
            .await?
        {
            return Err(CatalogError::UserNotFound);
        }
        Ok(())
    }
}

// ── SetRole ──────────────────────────────────────────────────────────────────

pub struct SetRoleUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SetRoleUseCase<R> {
    pub async fn execute(&self, id: UserId, role: UserRole) -> Result<(), CatalogError> {
        if !self.repo.set_role(id, role).await? {
            return Err(CatalogError::UserNotFound);
        }
        tracing::info!(user_id = %id, role = %role, "role changed");
        Ok(())
    }
}
