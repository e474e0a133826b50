//! Marker-based templates.
//!
//! A template is literal text with embedded markers such as `{{N}}` or
//! `{{#class.simpleName:0}}`. It is parsed once into a [`Script`] and
//! evaluated any number of times against [`Bindings`](crate::Bindings).
//!
//! - [`Script`] - Parsed, immutable instruction sequence
//! - [`Instruction`] - Literal text or a bound action
//! - [`Action`] / [`ActionTable`] - Marker codes and what they do
//! - [`Markers`] - Begin/end delimiters
//! - [`ScriptCache`] - Parse-once cache shared across threads

mod action;
mod cache;
mod parser;
mod program;

pub use action::{Action, ActionSpec, ActionTable, Arity};
pub use cache::ScriptCache;
pub use parser::{ActionInstruction, Instruction, Markers, Selector};
pub use program::Script;
