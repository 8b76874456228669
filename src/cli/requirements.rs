use std::path::PathBuf;

use clap::Parser;
use pkgmeta::ProjectRoot;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Print the dependency specifiers kept from a requirements file")]
pub struct Requirements {
    /// Requirements file, relative to the project root
    #[arg(default_value = "requirements.txt")]
    path: PathBuf,
}

impl Requirements {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let list = ProjectRoot::new(root).read_requirement_list(&self.path)?;
        for specifier in &list {
            println!("{specifier}");
        }
        Ok(())
    }
}
