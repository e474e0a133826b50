use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use listing::Script;

use super::UnwrapOrExit;
use crate::{
    ops::{self, bindings::parse_key_value, render::RenderOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RenderCommand {
    /// Template file
    pub template: PathBuf,

    /// Values for markers without a selector, in order
    pub values: Vec<String>,

    /// Named value for `{{code:key}}` markers (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub named: Vec<(String, String)>,

    /// JSON file with values: an array binds positions, an object binds keys
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Path to listing.toml (defaults to ./listing.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Package of the rendered document (overrides listing.toml)
    #[arg(long)]
    pub package: Option<String>,

    /// Shorten names and compute the imports they need
    #[arg(long)]
    pub resolve: bool,

    /// Print package and import declarations before the text (implies --resolve)
    #[arg(long)]
    pub imports: bool,
}

impl RenderCommand {
    pub fn run(&self) -> Result<()> {
        let mut config = ops::load_config(self.config.as_deref()).unwrap_or_exit();
        if let Some(package) = &self.package {
            config.imports.package = package.clone();
        }

        let source = ops::read_template(&self.template)?;
        let name = self.template.display().to_string();
        let script = Script::parse_named(&name, &source, &config.markers).unwrap_or_exit();
        let bindings = ops::bindings(&self.values, &self.named, self.json.as_deref())?;

        let options = RenderOptions {
            resolve: self.resolve,
            imports: self.imports,
        };
        let report = ops::render(&script, &bindings, &config, options).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
