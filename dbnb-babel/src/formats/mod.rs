//! Format implementations
//!
//! This module contains all format implementations that convert between
//! [`crate::notebook::Notebook`] and its textual representations.

pub mod databricks;
pub mod json;

pub use databricks::{SourceDialect, SourceFormat, SourceVersion};
pub use json::JsonFormat;
