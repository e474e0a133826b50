use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use listing::Script;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Template file
    pub template: PathBuf,

    /// Path to listing.toml (defaults to ./listing.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let config = ops::load_config(self.config.as_deref()).unwrap_or_exit();
        let source = ops::read_template(&self.template)?;
        let name = self.template.display().to_string();
        let script = Script::parse_named(&name, &source, &config.markers).unwrap_or_exit();

        let report = ops::explain(&script, &self.template, &config.markers);
        if self.json {
            let json =
                serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
