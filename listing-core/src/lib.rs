//! Core model types for the listing source assembler.
//!
//! This crate provides the value types shared by the rendering and
//! templating layers: qualified names and the literal/identifier helpers
//! of the target language.

mod error;
mod literal;
mod name;

pub use error::NameError;
// Identifier and literal utilities
pub use literal::{is_identifier, is_keyword, string_literal};
pub use name::QualifiedName;
