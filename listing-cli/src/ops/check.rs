//! Check operation - template validation.

use std::path::PathBuf;

use listing::{Markers, Script};
use miette::Report;

use crate::reports::{CheckReport, TemplateCheck};

/// Execute the check operation.
///
/// Every template is read and parsed; failures are collected rather than
/// aborting at the first one.
pub fn check(templates: &[PathBuf], markers: &Markers) -> CheckReport {
    let results = templates
        .iter()
        .map(|path| {
            let outcome = match std::fs::read_to_string(path) {
                Ok(source) => {
                    let name = path.display().to_string();
                    Script::parse_named(&name, &source, markers)
                        .map(|script| script.instructions().len())
                        .map_err(Report::new)
                }
                Err(e) => Err(miette::miette!("failed to read {}: {}", path.display(), e)),
            };
            TemplateCheck {
                path: path.clone(),
                outcome,
            }
        })
        .collect();
    CheckReport { results }
}
