//! # Lingo Common
//!
//! Shared types, utilities, and common functionality for Lingo.
//!
//! This crate provides the error type used across the workspace together with
//! the small language-code and whitespace helpers that both the resolver and
//! the configuration layer rely on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
