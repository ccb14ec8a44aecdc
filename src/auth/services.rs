use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};

use super::{
    dto::TokenResponse,
    jwt::JwtKeys,
    password::{hash_password, hash_password_blocking, verify_password_blocking},
    repo::UserRepo,
    repo_types::User,
};
use crate::{
    error::{ApiError, ApiResult},
    store::StoreError,
};

/// Shared by unknown-email and wrong-password so callers cannot tell them apart.
pub const BAD_CREDENTIALS: &str = "Bad email or password";

/// Width of `users.email`.
pub const MAX_EMAIL_LEN: usize = 120;

lazy_static! {
    /// Verified against when the email is unknown, so that path costs the
    /// same Argon2 work as a wrong password.
    static ref DUMMY_HASH: String = hash_password("holonet-unknown-user").unwrap_or_default();
}

fn hash_to_check(user: Option<&User>) -> &str {
    match user {
        Some(user) => &user.password_hash,
        None => DUMMY_HASH.as_str(),
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Present and non-blank, or a 400 naming the field.
pub(crate) fn required(value: Option<String>, field: &str) -> ApiResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!(
            "You need to specify the {}",
            field
        ))),
    }
}

pub async fn register<U>(users: &U, email: &str, password: &str) -> ApiResult<User>
where
    U: UserRepo + ?Sized,
{
    if email.chars().count() > MAX_EMAIL_LEN {
        warn!(len = email.len(), "email too long");
        return Err(ApiError::bad_request(format!(
            "email must be at most {} characters",
            MAX_EMAIL_LEN
        )));
    }

    if !is_valid_email(email) {
        warn!(email, "invalid email");
        return Err(ApiError::bad_request("Invalid email"));
    }

    if users.find_user_by_email(email).await?.is_some() {
        warn!(email, "email already registered");
        return Err(ApiError::bad_request("User already exists"));
    }

    let hash = hash_password_blocking(password.to_string()).await?;

    match users.create_user(email, &hash).await {
        Ok(user) => {
            info!(user_id = user.id, email = %user.email, "user registered");
            Ok(user)
        }
        // lost a race with a concurrent signup for the same email
        Err(StoreError::Conflict) => {
            warn!(email, "email already registered");
            Err(ApiError::bad_request("User already exists"))
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            Err(e.into())
        }
    }
}

pub async fn authenticate<U>(users: &U, email: &str, password: &str) -> ApiResult<User>
where
    U: UserRepo + ?Sized,
{
    let user = users.find_user_by_email(email).await?;
    let matches = verify_password_blocking(
        password.to_string(),
        hash_to_check(user.as_ref()).to_string(),
    )
    .await;

    let Some(user) = user else {
        warn!(email, "login unknown email");
        return Err(ApiError::bad_request(BAD_CREDENTIALS));
    };

    if !matches? {
        warn!(email, user_id = user.id, "login invalid password");
        return Err(ApiError::bad_request(BAD_CREDENTIALS));
    }

    Ok(user)
}

pub fn issue_tokens(keys: &JwtKeys, user_id: i64) -> ApiResult<TokenResponse> {
    Ok(TokenResponse {
        access_token: keys.sign_access(user_id)?,
        refresh_token: keys.sign_refresh(user_id)?,
    })
}
