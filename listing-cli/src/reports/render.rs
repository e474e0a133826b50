//! Render command report data structures.

use super::output::{Output, Report};

/// A rendered template.
#[derive(Debug)]
pub struct RenderReport {
    /// Package declaration to emit, if any.
    pub package: Option<String>,
    /// Import lines to emit before the text.
    pub imports: Vec<String>,
    /// The rendered text.
    pub text: String,
}

impl RenderReport {
    /// The complete source: package, imports and text.
    pub fn to_source(&self) -> String {
        let mut source = String::new();
        if let Some(package) = &self.package {
            source.push_str(&format!("package {};\n\n", package));
        }
        for import in &self.imports {
            source.push_str(import);
            source.push('\n');
        }
        if !self.imports.is_empty() {
            source.push('\n');
        }
        source.push_str(&self.text);
        source
    }
}

impl Report for RenderReport {
    fn render(&self, out: &mut dyn Output) {
        out.text(&self.to_source());
    }
}
