pub mod assets;
mod builder;
/// Python package discovery.
pub mod discovery;

pub use assets::{AssetError, ProjectRoot};
pub use builder::{build_package_descriptor, load_config, BuildError, CONFIG_FILE};
pub use discovery::{find_packages, Discovery, DiscoveryError};
