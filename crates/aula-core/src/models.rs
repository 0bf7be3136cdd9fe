pub mod catalog;
pub mod plan;
pub mod reference;
pub mod request;
