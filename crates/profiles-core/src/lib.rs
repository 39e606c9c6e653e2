//! Core types and trait definitions for the profile service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod key;
pub mod profile;
pub mod store;

pub use error::{Error, Result};
