use std::path::Path;

use clap::Parser;
use pkgmeta::{find_packages, load_config, Discovery};
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "List the Python packages found under the project root")]
pub struct Packages {
    /// Package name pattern to include (can be specified multiple times)
    ///
    /// Defaults to the configured patterns.
    #[arg(long, value_name = "PATTERN")]
    include: Vec<String>,

    /// Package name pattern to exclude (can be specified multiple times)
    ///
    /// Defaults to the configured patterns.
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,
}

impl Packages {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = load_config(root)?;
        let include = if self.include.is_empty() {
            config.include
        } else {
            self.include
        };
        let exclude = if self.exclude.is_empty() {
            config.exclude
        } else {
            self.exclude
        };

        for package in find_packages(root, &Discovery::new(include, exclude))? {
            println!("{package}");
        }
        Ok(())
    }
}
