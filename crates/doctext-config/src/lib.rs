//! Doctext Config - Configuration management for Doctext.

mod config;
mod error;
mod paths;

pub use config::*;
pub use error::{ConfigError, ConfigResult};
pub use paths::AppPaths;
