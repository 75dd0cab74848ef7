//! Core types - pure abstractions shared across the codebase.

mod base;

pub use base::BasePath;
