//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenKind, TokenService};
pub use cache::Cache;
pub use repository::{AccountRepository, BaseRepository, PostRepository};
