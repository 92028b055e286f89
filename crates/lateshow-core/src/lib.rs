//! Core types and trait definitions for the Late Show API.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod appearance;
pub mod episode;
pub mod error;
pub mod guest;
pub mod store;
pub mod validate;
pub mod view;

pub use error::{Error, Result, ValidationError};
