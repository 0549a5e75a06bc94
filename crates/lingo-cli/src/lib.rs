//! # Lingo CLI
//!
//! Loads a plugin options file and either prints one translation or audits
//! the catalog's plural entries.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;

pub use cli::*;
pub use error::*;
