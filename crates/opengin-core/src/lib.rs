//! Core types and trait definitions for the OpenGIN entity access layer.
//!
//! This crate is deliberately free of HTTP dependencies. The client, the
//! proxy API and the CLI all depend on it.

pub mod entity;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod kind;
pub mod search;
pub mod validate;

pub use error::{Error, Result};
