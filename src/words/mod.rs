//! Random word selection and word validation

pub mod selection;
pub mod service;

pub use selection::RandomSelector;
pub use service::{parse_length_filter, WordService};
