//! Scrumsight Core — shared error type and pipeline configuration.

pub mod config;
pub mod error;

pub use config::ScrumsightConfig;
pub use error::{Error, Result};
