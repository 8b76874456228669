use std::{path::PathBuf, process};

use clap::Parser;
use pkgmeta::{load_config, ProjectRoot};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Check that every configured asset can be read")]
pub struct Check {
    /// Suppress output for passing assets
    #[arg(long, short)]
    quiet: bool,
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let config = load_config(&root)?;
        let project = ProjectRoot::new(root);

        let mut failures = 0;
        for asset in config.assets() {
            match project.read_text([asset]) {
                Ok(_) => {
                    if !self.quiet {
                        println!("{} {}", "✓".success(), asset.display());
                    }
                }
                Err(e) => {
                    failures += 1;
                    println!("{} {} {}", "✗".error(), asset.display(), e.to_string().dim());
                }
            }
        }

        if failures > 0 {
            eprintln!("{failures} asset(s) could not be read");
            process::exit(1);
        }

        Ok(())
    }
}
