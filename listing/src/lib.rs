//! Deferred-resolution pretty-printer and marker templates for generated
//! Java source.
//!
//! # Module Organization
//!
//! - [`Listing`] - Line buffer with indentation and a name-usage log
//! - [`Listable`] / [`Fragment`] - Things that write themselves into a listing
//! - [`Style`] / [`NameStyle`] - How a qualified name is spelled
//! - [`ImportTable`] - Import declarations and the policy derived from them
//! - [`ImportResolver`] - Two-pass computation of collision-free imports
//! - [`Script`] - Parsed marker templates, evaluated against [`Bindings`]
//! - [`Tags`] - Typed side-table for model metadata
//! - [`Config`] - `listing.toml`

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod imports;
mod indent;
mod listable;
mod listing;
mod resolver;
mod script;
mod style;
mod tags;
mod types;
mod value;

pub use config::{Config, FormatConfig, ImportsConfig};
pub use error::{ConfigError, Error, EvalError, ParseError, Result};
pub use imports::{Import, ImportTable};
pub use indent::Indent;
pub use listable::{Fragment, FromFn, Listable, from_fn, render};
pub use listing::Listing;
pub use listing_core::QualifiedName;
pub use resolver::{ImportResolver, Resolution, StyleMap};
pub use script::{
    Action, ActionInstruction, ActionSpec, ActionTable, Arity, Instruction, Markers, Script,
    ScriptCache, Selector,
};
pub use style::{CanonicalStyle, NameStyle, Style};
pub use tags::{Handle, Tag, Tags};
pub use types::{PrimitiveType, TypeRef, WildcardBound};
pub use value::{Accessor, Bindings, RuntimeType, Value};
