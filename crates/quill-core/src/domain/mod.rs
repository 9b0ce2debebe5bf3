//! Domain entities - the core business objects.

mod account;
mod post;
mod principal;

pub use account::Account;
pub use post::{AuthoredPost, Post, PostChanges, PostDraft};
pub use principal::{AccountRef, Principal};
