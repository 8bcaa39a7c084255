use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::{WithRejection, cookie::CookieJar};
use serde::{Deserialize, Serialize};

use campus_auth_types::bearer::BearerToken;
use campus_auth_types::cookie::set_token_cookie;
use campus_domain::id::UserId;
use campus_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListUsersUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    SetRoleUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, CatalogError> {
    raw.parse().map_err(|_| CatalogError::InvalidId)
}

// ── POST /users/register ─────────────────────────────────────────────────────

/// A `role` field, if sent, is ignored.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: i64,
}

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, CatalogError>,
) -> Result<(StatusCode, Json<RegisterResponse>), CatalogError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
        admin_emails: state.admin_emails.to_vec(),
    };
    let id = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { id: id.0 })))
}

// ── POST /users/login ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds since UNIX epoch.
    pub expires_at: u64,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, CatalogError>,
) -> Result<(CookieJar, Json<LoginResponse>), CatalogError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        tokens: state.tokens.clone(),
        ttl: state.token_ttl,
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    tracing::info!(user_id = %output.user_id, "login");
    let jar = set_token_cookie(
        jar,
        output.token.token.clone(),
        state.token_ttl.as_secs(),
        state.cookie_secure,
    );
    Ok((
        jar,
        Json(LoginResponse {
            token: output.token.token,
            expires_at: output.token.exp,
        }),
    ))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, CatalogError> {
    let info = state.tokens.verify(&token)?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(info.subject_id).await?.into()))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub async fn update_me(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateMeRequest>, CatalogError>,
) -> Result<StatusCode, CatalogError> {
    let info = state.tokens.verify(&token)?;
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(
            info.subject_id,
            UpdateProfileInput {
                name: body.name,
                email: body.email,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users (admin) ───────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, CatalogError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/{id} (admin) ──────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, CatalogError>,
) -> Result<Json<UserResponse>, CatalogError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(parse_user_id(&id)?).await?.into()))
}

// ── PUT /users/{id}/role (admin) ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetRoleRequest {
    #[serde(default)]
    pub role: String,
}

pub async fn set_role(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, CatalogError>,
    WithRejection(Json(body), _): WithRejection<Json<SetRoleRequest>, CatalogError>,
) -> Result<StatusCode, CatalogError> {
    let id = parse_user_id(&id)?;
    let role = body
        .role
        .parse::<UserRole>()
        .map_err(|_| CatalogError::InvalidRole)?;
    let usecase = SetRoleUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(id, role).await?;
    Ok(StatusCode::NO_CONTENT)
}
