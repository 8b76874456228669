//! `pkgmeta` builds Python package descriptors from a project's plain-text
//! assets.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
