//! Handlers for the `/auth` resource (registration, email verification,
//! login, password reset) and the `/me` profile.
//!
//! Email delivery is not part of this service: verification and reset links
//! are logged at DEBUG for whatever delivers them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bookit_core::error::CoreError;
use bookit_db::models::user::{CreateUser, UpdateProfile, UserResponse};
use bookit_db::repositories::UserRepo;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{generate_token, hash_token};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minutes a password reset token stays valid.
const RESET_TOKEN_EXPIRY_MINS: i64 = 30;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/password/forgot`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `PUT /auth/password/reset/{token}`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8))]
    pub password: String,
    pub confirm_password: String,
}

/// Request body for `PUT /me`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// New password; omit (or send empty) to keep the current one.
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Acknowledgement for endpoints that only report success.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an unverified account and issue an email verification token.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let verify_token = generate_token();

    let create_dto = CreateUser {
        name: input.name,
        email: input.email,
        password_hash,
        verify_token,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(user_id = user.id, "User registered");
    tracing::debug!(
        user_id = user.id,
        verify_url = %format!("/api/v1/auth/verify/{}", create_dto.verify_token),
        "Email verification link issued"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// GET /api/v1/auth/verify/{token}
///
/// Mark the account holding `token` as verified. The token is single-use.
pub async fn verify(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::verify(&state.pool, &token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Invalid or expired verification link".into(),
            ))
        })?;

    tracing::info!(user_id = user.id, "User verified");
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Unverified accounts are refused.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    if !user.verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Email not verified yet".into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(&user),
    }))
}

/// POST /api/v1/auth/password/forgot
///
/// Issue a password reset token. Always answers 200 so the endpoint cannot be
/// used to probe which emails are registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        let token = generate_token();
        let expires_at = Utc::now() + chrono::Duration::minutes(RESET_TOKEN_EXPIRY_MINS);
        UserRepo::set_reset_token(&state.pool, user.id, &hash_token(&token), expires_at).await?;

        tracing::debug!(
            user_id = user.id,
            reset_url = %format!("/api/v1/auth/password/reset/{token}"),
            "Password reset link issued"
        );
    }

    Ok(Json(MessageResponse {
        message: "If the email is registered, a reset link has been sent",
    }))
}

/// PUT /api/v1/auth/password/reset/{token}
///
/// Set a new password using an unexpired reset token.
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;
    if input.password != input.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".into()));
    }

    let user = UserRepo::find_by_reset_token_hash(&state.pool, &hash_token(&token))
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("Password reset token is invalid or has expired".into())
        })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password reset");
    Ok(Json(MessageResponse {
        message: "Password updated successfully",
    }))
}

/// GET /api/v1/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/me
///
/// Update the caller's name and email, and optionally their password.
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Json(mut input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if input.password.as_deref() == Some("") {
        input.password = None;
    }
    input.validate()?;

    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let update_dto = UpdateProfile {
        name: input.name,
        email: input.email,
        password_hash,
    };
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
