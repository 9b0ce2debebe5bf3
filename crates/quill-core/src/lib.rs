//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains the post lifecycle rules (validation, authorization,
//! services) with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod service;
pub mod validation;

pub use error::DomainError;
