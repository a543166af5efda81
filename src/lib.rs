//! copy-poll crate
//!
//! This crate is an implementation detail of the `copy-poll` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.
//!
//! # Module Organization
//!
//! - [`config`]: Loading the task file
//! - [`probe`]: Running status commands and interpreting their output
//! - [`tracking`]: The two-phase polling engine
//! - [`commands`]: Command-line interface and rendering

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod probe;

#[doc(hidden)]
pub mod tracking;

pub use crate::commands::{Host, run};
