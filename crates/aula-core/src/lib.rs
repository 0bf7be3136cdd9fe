//! aula-core
//!
//! Pure domain types for lesson-plan generation: the request record, the
//! form catalog, reference datasets, the Plan Document and its response
//! schema. No network dependency.

pub mod error;
pub mod models;
pub mod plan;
pub mod schema;
