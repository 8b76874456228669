use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// Project configuration for building a package descriptor.
///
/// This struct holds the static metadata copied into the descriptor, and the
/// locations of the text assets it is assembled from. All paths are relative
/// to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The distribution name.
    name: NonEmptyString,

    /// One-line summary of the package.
    pub description: String,

    /// Project home page. May be empty.
    pub url: String,

    /// Author's display name.
    pub author: String,

    /// Author's contact address.
    pub author_email: String,

    /// Interpreter version constraint, e.g. `>=3.8`.
    pub python_requires: String,

    /// Optional asset holding the package version.
    ///
    /// The version is only read when this is set.
    pub version_file: Option<PathBuf>,

    /// Asset embedded as the long description.
    pub readme: PathBuf,

    /// Content type declared for the long description.
    pub readme_content_type: String,

    /// The primary requirements file.
    pub requirements: PathBuf,

    /// Extras groups, mapping the group name to its requirements file.
    pub extras: BTreeMap<String, PathBuf>,

    /// Package name patterns to include during discovery.
    pub include: Vec<String>,

    /// Package name patterns to exclude during discovery.
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            url: String::new(),
            author: default_author(),
            author_email: default_author_email(),
            python_requires: default_python_requires(),
            version_file: None,
            readme: default_readme(),
            readme_content_type: default_readme_content_type(),
            requirements: default_requirements(),
            extras: default_extras(),
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the distribution name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Sets the distribution name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn set_name(&mut self, name: String) -> Result<(), InvalidConfigError> {
        self.name = NonEmptyString::new(name).map_err(|_| InvalidConfigError::EmptyName)?;
        Ok(())
    }

    /// Returns every asset the descriptor is built from, in read order.
    ///
    /// Extras groups come last, sorted by group name.
    #[must_use]
    pub fn assets(&self) -> Vec<&Path> {
        self.version_file
            .iter()
            .map(PathBuf::as_path)
            .chain([self.readme.as_path(), self.requirements.as_path()])
            .chain(self.extras.values().map(PathBuf::as_path))
            .collect()
    }
}

/// Error returned when a configuration file holds invalid values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidConfigError {
    /// The package name is empty.
    #[error("package name must not be empty")]
    EmptyName,
}

fn default_name() -> NonEmptyString {
    NonEmptyString::new("fMRI Preprocessing".to_string()).expect("literal is non-empty")
}

fn default_description() -> String {
    "Awesome preproceesing tool using Nipype created by Alix L.".to_string()
}

fn default_author() -> String {
    "Alix L.".to_string()
}

fn default_author_email() -> String {
    "alix.lamouroux@imt-atlantique.fr".to_string()
}

fn default_python_requires() -> String {
    ">=3.8".to_string()
}

fn default_readme() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_readme_content_type() -> String {
    super::README_CONTENT_TYPE.to_string()
}

fn default_requirements() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_extras() -> BTreeMap<String, PathBuf> {
    BTreeMap::from([("test".to_string(), PathBuf::from("requirements-test.txt"))])
}

fn default_include() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["tests".to_string()]
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_name_string")]
        name: String,

        #[serde(default = "default_description")]
        description: String,

        #[serde(default)]
        url: String,

        #[serde(default = "default_author")]
        author: String,

        #[serde(default = "default_author_email")]
        author_email: String,

        #[serde(default = "default_python_requires")]
        python_requires: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        version_file: Option<PathBuf>,

        #[serde(default = "default_readme")]
        readme: PathBuf,

        #[serde(default = "default_readme_content_type")]
        readme_content_type: String,

        #[serde(default = "default_requirements")]
        requirements: PathBuf,

        #[serde(default = "default_include")]
        include: Vec<String>,

        #[serde(default = "default_exclude")]
        exclude: Vec<String>,

        /// Extras groups. An empty table disables the default `test` group.
        #[serde(default = "default_extras")]
        extras: BTreeMap<String, PathBuf>,
    },
}

fn default_name_string() -> String {
    default_name().as_str().to_string()
}

impl TryFrom<Versions> for Config {
    type Error = InvalidConfigError;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                name,
                description,
                url,
                author,
                author_email,
                python_requires,
                version_file,
                readme,
                readme_content_type,
                requirements,
                extras,
                include,
                exclude,
            } => Ok(Self {
                name: NonEmptyString::new(name).map_err(|_| InvalidConfigError::EmptyName)?,
                description,
                url,
                author,
                author_email,
                python_requires,
                version_file,
                readme,
                readme_content_type,
                requirements,
                extras,
                include,
                exclude,
            }),
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            name: config.name.as_str().to_string(),
            description: config.description,
            url: config.url,
            author: config.author,
            author_email: config.author_email,
            python_requires: config.python_requires,
            version_file: config.version_file,
            readme: config.readme,
            readme_content_type: config.readme_content_type,
            requirements: config.requirements,
            extras: config.extras,
            include: config.include,
            exclude: config.exclude,
        }
    }
}
