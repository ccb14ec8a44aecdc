//! Planets, characters and per-user favourites over HTTP, with email/password
//! signup and bearer-token login.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favourites;
pub mod state;
pub mod store;

pub use app::build_app;
pub use state::AppState;
