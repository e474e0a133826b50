use std::path::PathBuf;

use listing_core::NameError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for listing operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error raised while configuring, parsing or evaluating.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Structural errors in a template, reported at parse time.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("unterminated marker, expected '{end}'")]
    #[diagnostic(
        code(listing::parse::unterminated),
        help("close the marker with '{end}'")
    )]
    Unterminated {
        #[source_code]
        src: NamedSource<String>,
        #[label("marker opened here")]
        span: SourceSpan,
        end: String,
    },

    #[error("unknown action code '{code}'")]
    #[diagnostic(
        code(listing::parse::unknown_action),
        help("known codes are ¶ ; _ > < $ S L N T B and #path")
    )]
    UnknownAction {
        #[source_code]
        src: NamedSource<String>,
        #[label("no action for this code")]
        span: SourceSpan,
        code: String,
    },

    #[error("marker delimiters must not be empty")]
    #[diagnostic(code(listing::parse::markers))]
    EmptyMarkers,
}

impl ParseError {
    /// The offending code, for unknown actions.
    pub fn unknown_code(&self) -> Option<&str> {
        match self {
            Self::UnknownAction { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Binding errors, reported while evaluating a parsed template.
#[derive(Debug, Error, Diagnostic)]
pub enum EvalError {
    #[error("missing argument '{key}'")]
    #[diagnostic(code(listing::eval::missing_argument))]
    MissingArgument { key: String },

    #[error("cannot resolve '{segment}' of path '{path}' on {value}")]
    #[diagnostic(
        code(listing::eval::unresolved_path),
        help("each segment must name an accessor, either directly or as 'get' + capitalized name")
    )]
    UnresolvedPath {
        path: String,
        segment: String,
        value: String,
    },

    #[error("action '{action}' does not accept {value} values")]
    #[diagnostic(code(listing::eval::unsupported_value))]
    UnsupportedValue { action: String, value: String },

    #[error("{value} value cannot be rendered")]
    #[diagnostic(code(listing::eval::not_renderable))]
    NotRenderable { value: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Name(#[from] NameError),
}

/// Errors reading `listing.toml`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(listing::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(listing::config::parse))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid import declaration '{declaration}' in {filename}")]
    #[diagnostic(
        code(listing::config::import),
        help("use 'a.b.C', 'a.b.*', 'static a.b.C.m' or 'static a.b.C.*'")
    )]
    InvalidImport {
        declaration: String,
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        #[source]
        source: NameError,
    },

    #[error("marker delimiters in {filename} must not be empty")]
    #[diagnostic(code(listing::config::markers))]
    EmptyMarkers { filename: String },
}

impl ConfigError {
    /// Create a parse error from a toml error with source context.
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Self {
        let span = source.span().map(SourceSpan::from);
        Self::Parse {
            filename: filename.to_string(),
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        }
    }

    /// Create an import error pointing at the declaration's quoted text.
    pub fn invalid_import(declaration: &str, source: NameError, src: &str, filename: &str) -> Self {
        let span = src
            .find(&format!("\"{declaration}\""))
            .map(|offset| SourceSpan::from((offset, declaration.len() + 2)));
        Self::InvalidImport {
            declaration: declaration.to_string(),
            filename: filename.to_string(),
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        }
    }
}
