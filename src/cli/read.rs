use std::path::PathBuf;

use clap::Parser;
use pkgmeta::{Encoding, ProjectRoot};
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Print a text asset with surrounding whitespace stripped")]
pub struct Read {
    /// Path segments, joined onto the project root
    #[arg(required = true)]
    segments: Vec<PathBuf>,

    /// Text encoding of the asset
    #[arg(long, short, default_value = "utf8")]
    encoding: Encoding,
}

impl Read {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let content = ProjectRoot::new(root).read_text_asset(&self.segments, self.encoding)?;
        println!("{content}");
        Ok(())
    }
}
