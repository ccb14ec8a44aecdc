use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LogoutRequest, PublicUser, RefreshRequest, SignupRequest, TokenResponse},
        extractors::{AuthUser, BearerClaims},
        jwt::TokenError,
        repo::UserRepo,
        services::{authenticate, issue_tokens, register, required},
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(payload) = payload?;
    let email = required(payload.email, "email")?.trim().to_string();
    let password = required(payload.password, "password")?;

    register(state.store.as_ref(), &email, &password).await?;
    Ok("ok")
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(payload) = payload?;
    let email = required(payload.email, "email")?.trim().to_string();
    let password = required(payload.password, "password")?;

    let user = authenticate(state.store.as_ref(), &email, &password).await?;
    let tokens = issue_tokens(&state.keys, user.id)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(tokens))
}

/// Exchanges a refresh token for a new pair. The presented refresh token is
/// revoked so each one can be used once.
#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(payload) = payload?;
    let claims = state.keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        ApiError::unauthorized(e.to_string())
    })?;

    // claim the token before any await so concurrent uses cannot both pass
    if !state.keys.revoke(&claims) {
        warn!(user_id = claims.sub, jti = %claims.jti, "refresh token already used");
        return Err(ApiError::unauthorized(TokenError::Revoked.to_string()));
    }

    // the account must still exist
    if state.store.find_user_by_id(claims.sub).await?.is_none() {
        warn!(user_id = claims.sub, "refresh for unknown user");
        return Err(ApiError::unauthorized("User not found"));
    }

    let tokens = issue_tokens(&state.keys, claims.sub)?;
    info!(user_id = claims.sub, "tokens refreshed");
    Ok(Json(tokens))
}

#[instrument(skip(state, claims, payload))]
pub async fn logout(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    payload: Option<Json<LogoutRequest>>,
) -> ApiResult<&'static str> {
    state.keys.revoke(&claims);

    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    if let Some(refresh_token) = payload.refresh_token {
        // only the caller's own refresh token may be revoked this way
        match state.keys.verify_refresh(&refresh_token) {
            Ok(rc) if rc.sub == claims.sub => {
                state.keys.revoke(&rc);
            }
            Ok(_) => warn!(user_id = claims.sub, "logout with foreign refresh token"),
            Err(e) => warn!(error = %e, "logout with unusable refresh token"),
        }
    }

    info!(user_id = claims.sub, "user logged out");
    Ok("ok")
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<PublicUser>> {
    let user = state.store.find_user_by_id(user_id).await?.ok_or_else(|| {
        warn!(user_id, "token for unknown user");
        ApiError::unauthorized("User not found")
    })?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> ApiResult<Json<Vec<PublicUser>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}
