//! aula-cli library root.
//!
//! Re-exports the configuration, settings and output modules so
//! integration tests can exercise them without going through the command
//! layer.

pub mod config;
pub mod output;
pub mod settings;
