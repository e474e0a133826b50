//! `listing.toml` configuration.

use std::{path::Path, str::FromStr};

use serde::Deserialize;
use tracing::warn;

use crate::{ConfigError, ImportResolver, ImportTable, Indent, Listing, Markers};

/// Root of `listing.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Marker delimiters for templates.
    pub markers: Markers,

    /// Output layout.
    pub format: FormatConfig,

    /// Import resolution.
    pub imports: ImportsConfig,
}

/// `[format]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FormatConfig {
    /// Spaces per level, or `"tab"`.
    pub indent: Indent,
}

/// `[imports]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ImportsConfig {
    /// Package of the rendered document; empty for the unnamed package.
    pub package: String,

    /// Packages visible without import.
    pub implicit: Vec<String>,

    /// Drop declared single-type imports the document never uses.
    pub prune: bool,

    /// Caller-declared imports, e.g. `"java.util.*"` or `"static a.B.c"`.
    pub declared: Vec<String>,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            package: String::new(),
            implicit: ImportResolver::DEFAULT_IMPLICIT
                .iter()
                .map(|p| p.to_string())
                .collect(),
            prune: true,
            declared: Vec::new(),
        }
    }
}

impl Config {
    /// Conventional file name.
    pub const FILE_NAME: &'static str = "listing.toml";

    /// Read and validate a configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse and validate configuration text, naming it `filename` in
    /// diagnostics.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::parse(e, content, filename))?;
        config.validate(content, filename)?;
        Ok(config)
    }

    fn validate(&self, src: &str, filename: &str) -> Result<(), ConfigError> {
        if self.markers.validate().is_err() {
            return Err(ConfigError::EmptyMarkers {
                filename: filename.to_string(),
            });
        }
        let mut table = ImportTable::new();
        for declaration in &self.imports.declared {
            table
                .declare(declaration)
                .map_err(|e| ConfigError::invalid_import(declaration, e, src, filename))?;
        }
        Ok(())
    }

    /// The declared imports as a table.
    ///
    /// Declarations that fail to parse are skipped; [`Config::open`] and
    /// [`FromStr`] reject them up front.
    pub fn import_table(&self) -> ImportTable {
        let mut table = ImportTable::new();
        for declaration in &self.imports.declared {
            if table.declare(declaration).is_err() {
                warn!(declaration = declaration.as_str(), "skipping invalid import declaration");
            }
        }
        table
    }

    /// An import resolver configured from `[imports]` and `[format]`.
    pub fn resolver(&self) -> ImportResolver {
        ImportResolver::new(self.imports.package.as_str())
            .implicit_packages(self.imports.implicit.iter().map(String::as_str))
            .declared(self.import_table())
            .prune(self.imports.prune)
            .indent(self.format.indent)
    }

    /// A fresh listing with the configured indentation.
    pub fn listing(&self) -> Listing {
        Listing::with_indent(self.format.indent)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_filename(s, Self::FILE_NAME)
    }
}
