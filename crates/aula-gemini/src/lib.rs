//! aula-gemini
//!
//! Gemini structured generation: reference loading, prompt assembly,
//! streamed invocation and remote-failure classification.

pub mod classify;
pub mod client;
pub mod error;
pub mod prompt;
pub mod reference;
pub mod sse;
pub mod transaction;
