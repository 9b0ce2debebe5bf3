//! Services - orchestrate validation, authorization and persistence.

mod account;
mod post;

#[cfg(test)]
mod fakes;

pub use account::{AccountService, NewAccount};
pub use post::PostService;
