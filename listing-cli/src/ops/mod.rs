//! Core operations.
//!
//! This module contains the business logic for listing commands,
//! separated from CLI argument parsing and output rendering.

pub mod bindings;
pub mod check;
pub mod explain;
pub mod render;

use std::path::Path;

use eyre::{Context, Result};
use listing::{Config, ConfigError};

pub use bindings::bindings;
pub use check::check;
pub use explain::explain;
pub use render::render;

/// Load `path`, or `./listing.toml` when present, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::open(path),
        None if Path::new(Config::FILE_NAME).is_file() => Config::open(Config::FILE_NAME),
        None => Ok(Config::default()),
    }
}

/// Read a template file.
pub fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read template {}", path.display()))
}
