use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;
mod revocation;
pub mod services;

pub use claims::{Claims, TokenKind};
pub use extractors::{AuthUser, BearerClaims};
pub use jwt::{JwtKeys, TokenError};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::user_routes())
}
