use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Template files to parse
    #[arg(required = true)]
    pub templates: Vec<PathBuf>,

    /// Path to listing.toml (defaults to ./listing.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = ops::load_config(self.config.as_deref()).unwrap_or_exit();
        let report = ops::check(&self.templates, &config.markers);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
