//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Outcome of parsing one template.
#[derive(Debug)]
pub struct TemplateCheck {
    /// Path to the template.
    pub path: PathBuf,
    /// Instruction count, or the diagnostic.
    pub outcome: Result<usize, miette::Report>,
}

/// Report data from template validation.
#[derive(Debug)]
pub struct CheckReport {
    pub results: Vec<TemplateCheck>,
}

impl CheckReport {
    /// Whether every template parsed.
    pub fn is_valid(&self) -> bool {
        self.failures() == 0
    }

    /// Number of templates that failed.
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_err()).count()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for result in &self.results {
            match &result.outcome {
                Ok(count) => out.preformatted(&format!(
                    "✓ {} ({} instruction{})",
                    result.path.display(),
                    count,
                    if *count == 1 { "" } else { "s" }
                )),
                Err(report) => out.error(&format!("{:?}", report)),
            }
        }

        if !self.is_valid() {
            out.newline();
            out.preformatted(&format!(
                "{} of {} templates failed",
                self.failures(),
                self.results.len()
            ));
        }
    }
}
