use std::path::PathBuf;

mod build;
mod check;
mod packages;
mod read;
mod requirements;
mod terminal;

use build::Build;
use check::Check;
use clap::ArgAction;
use packages::Packages;
use read::Read;
use requirements::Requirements;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the Python project
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Build(Build::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Build the package descriptor (default)
    Build(Build),

    /// Print a stripped text asset
    Read(Read),

    /// Print the specifiers kept from a requirements file
    Requirements(Requirements),

    /// List the Python packages found under the root
    Packages(Packages),

    /// Check that every configured asset can be read
    Check(Check),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Build(command) => command.run(root)?,
            Self::Read(command) => command.run(root)?,
            Self::Requirements(command) => command.run(root)?,
            Self::Packages(command) => command.run(&root)?,
            Self::Check(command) => command.run(root)?,
        }
        Ok(())
    }
}
