//! Shared types for discwatch.
//!
//! - **Error Handling**: the [`Error`] taxonomy and [`Result`] alias used by
//!   the classifier, dispatcher and watch loop
//! - **Typed IDs**: UUID wrappers for playlist nodes and items

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::*;
