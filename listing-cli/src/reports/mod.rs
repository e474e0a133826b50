//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod explain;
mod output;
mod render;

pub use check::{CheckReport, TemplateCheck};
pub use explain::{ActionInfo, ExplainReport, InstructionInfo};
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
pub use render::RenderReport;
