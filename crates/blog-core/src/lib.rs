//! # Blog Core
//!
//! The domain layer of the blog API.
//! This crate contains the post model, the listing query vocabulary and the
//! post service, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
