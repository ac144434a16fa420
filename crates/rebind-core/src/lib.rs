//! Rebind Core - Foundational types for the Rebind toolchain
//!
//! This crate provides the pieces every other Rebind crate depends on:
//! - `RebindError` and the `Result` alias
//! - Slash-separated object path helpers
//! - `ContentHash` for detecting unchanged clip documents

mod error;
mod hash;
pub mod path;

pub use error::{RebindError, Result};
pub use hash::ContentHash;
pub use path::{object_name, DEFAULT_ATTRIBUTE, PATH_SEPARATOR};
