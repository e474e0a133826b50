use miette::Diagnostic;
use thiserror::Error;

/// Invariant violations raised while constructing or deriving a [`QualifiedName`].
///
/// [`QualifiedName`]: crate::QualifiedName
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum NameError {
    #[error("qualified name must contain at least one identifier")]
    #[diagnostic(code(listing::name::empty))]
    Empty,

    #[error("package level {level} is out of range for '{name}' ({size} identifiers)")]
    #[diagnostic(code(listing::name::package_level))]
    PackageLevel {
        name: String,
        level: usize,
        size: usize,
    },

    #[error("'{identifier}' is not a valid identifier")]
    #[diagnostic(
        code(listing::name::invalid_identifier),
        help("{reason}")
    )]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("'{name}' has no enclosing name")]
    #[diagnostic(code(listing::name::no_enclosing))]
    NoEnclosing { name: String },

    #[error("member reference '{name}' is not enclosed by a type")]
    #[diagnostic(
        code(listing::name::member_without_type),
        help("a member needs at least one type identifier after the package")
    )]
    MemberWithoutType { name: String },
}
