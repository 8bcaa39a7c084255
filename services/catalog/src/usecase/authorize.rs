//! Role-gated operations.
//!
//! The role embedded in a token is only a hint. The gate always re-reads the
//! subject's current role from the user store, so a token minted before a
//! demotion cannot reach admin operations.

use std::future::Future;

use campus_auth_types::bearer::strip_bearer;
use campus_auth_types::token::{TokenInfo, TokenService};
use campus_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::error::CatalogError;

pub struct RoleGate<U: UserRepository> {
    pub users: U,
    pub tokens: TokenService,
}

impl<U: UserRepository> RoleGate<U> {
    /// Verify the `Authorization` header value and nothing else.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<TokenInfo, CatalogError> {
        let token = authorization
            .and_then(strip_bearer)
            .ok_or(CatalogError::Unauthenticated)?;
        Ok(self.tokens.verify(token)?)
    }

    /// Authenticate, then require the stored role to equal `required`.
    ///
    /// Unknown subject → `Forbidden`. Store failure → `Internal`.
    pub async fn authorize(
        &self,
        required: UserRole,
        authorization: Option<&str>,
    ) -> Result<TokenInfo, CatalogError> {
        let info = self.authenticate(authorization)?;
        let user = self
            .users
            .find_by_id(info.subject_id)
            .await?
            .ok_or(CatalogError::Forbidden)?;
        if user.role != required {
            tracing::debug!(
                subject_id = %info.subject_id,
                stored_role = %user.role,
                required_role = %required,
                "role check failed"
            );
            return Err(CatalogError::Forbidden);
        }
        Ok(info)
    }

    /// Run `op` only if the caller holds `required`.
    pub async fn require_role<F, Fut, T>(
        &self,
        required: UserRole,
        authorization: Option<&str>,
        op: F,
    ) -> Result<T, CatalogError>
    where
        F: FnOnce(TokenInfo) -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let info = self.authorize(required, authorization).await?;
        op(info).await
    }
}
