//! Render operation - template evaluation.

use listing::{Bindings, Config, Error, Script};
use tracing::debug;

use crate::reports::RenderReport;

/// How to render a template.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Shorten names and compute imports.
    pub resolve: bool,
    /// Emit the package and import declarations before the text.
    pub imports: bool,
}

/// Execute the render operation.
///
/// With `resolve` or `imports` set the template is evaluated twice through
/// the configured import resolver; otherwise once, with canonical names.
pub fn render(
    script: &Script,
    bindings: &Bindings,
    config: &Config,
    options: RenderOptions,
) -> Result<RenderReport, Error> {
    if !options.resolve && !options.imports {
        let mut listing = config.listing();
        script.evaluate(&mut listing, bindings)?;
        return Ok(RenderReport {
            package: None,
            imports: Vec::new(),
            text: listing.build(),
        });
    }

    let resolution = script.resolve(&config.resolver(), bindings)?;
    debug!(imports = resolution.imports.len(), "resolved imports");
    let (package, imports) = if options.imports {
        let package = Some(config.imports.package.clone()).filter(|p| !p.is_empty());
        let imports = resolution
            .imports
            .declarations()
            .iter()
            .map(ToString::to_string)
            .collect();
        (package, imports)
    } else {
        (None, Vec::new())
    };
    Ok(RenderReport {
        package,
        imports,
        text: resolution.text,
    })
}
