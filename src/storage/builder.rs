use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    domain::{Config, PackageDescriptor},
    storage::{
        assets::{AssetError, ProjectRoot},
        discovery::{find_packages, Discovery, DiscoveryError},
    },
};

/// Name of the optional configuration file in the project root.
pub const CONFIG_FILE: &str = "pkgmeta.toml";

/// Loads the project configuration, falling back to the defaults if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`BuildError::Config`] if the file exists but cannot be read or
/// parsed.
pub fn load_config(root: &Path) -> Result<Config, BuildError> {
    let path = root.join(CONFIG_FILE);
    if !path.try_exists().unwrap_or(true) {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    Config::load(&path).map_err(|message| BuildError::Config { path, message })
}

/// Assembles a package descriptor from the project's assets.
///
/// Assets are read in order: the version (if configured), the README, the
/// primary requirements, then each extras group sorted by name. Packages are
/// discovered last.
///
/// # Errors
///
/// The first asset that cannot be read or decoded aborts the build, as does an
/// invalid discovery pattern.
pub fn build_package_descriptor(
    root: &ProjectRoot,
    config: &Config,
) -> Result<PackageDescriptor, BuildError> {
    let version = config
        .version_file
        .as_deref()
        .map(|path| root.read_text([path]))
        .transpose()?;

    let long_description = root.read_text([&config.readme])?;
    let install_requires = root.read_requirement_list(&config.requirements)?;

    let extras_require = config
        .extras
        .iter()
        .map(|(group, path)| {
            root.read_requirement_list(path)
                .map(|list| (group.clone(), list))
        })
        .collect::<Result<BTreeMap<_, _>, AssetError>>()?;

    let packages = find_packages(root.path(), &Discovery::from_config(config))?;

    tracing::info!(
        "Built descriptor for '{}' with {} packages",
        config.name(),
        packages.len()
    );

    Ok(PackageDescriptor {
        name: config.name().to_string(),
        version,
        description: config.description.clone(),
        url: config.url.clone(),
        long_description,
        long_description_content_type: config.readme_content_type.clone(),
        author: config.author.clone(),
        author_email: config.author_email.clone(),
        python_requires: config.python_requires.clone(),
        packages,
        install_requires,
        extras_require,
    })
}

/// Failure to build a package descriptor.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The configuration file exists but is invalid.
    #[error("invalid config {}: {message}", path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// A text asset could not be read.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Package discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}
