use std::path::PathBuf;

use clap::Parser;
use pkgmeta::{build_package_descriptor, load_config, ProjectRoot};
use tracing::instrument;

#[derive(Debug, Parser, Default)]
#[command(about = "Build the package descriptor")]
pub struct Build {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Toml,
}

impl Build {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let config = load_config(&root)?;
        let descriptor = build_package_descriptor(&ProjectRoot::new(root), &config)?;

        let rendered = match self.format {
            OutputFormat::Json => descriptor.to_json()?,
            OutputFormat::Toml => descriptor.to_toml()?,
        };
        println!("{rendered}");

        Ok(())
    }
}
