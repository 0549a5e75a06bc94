//! # Lingo Config
//!
//! Plugin options for Lingo: schema, defaults, validation, loading from
//! JSON/TOML/YAML files, and a file watcher for catalog hot-reload.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;
pub mod watcher;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
pub use watcher::*;
