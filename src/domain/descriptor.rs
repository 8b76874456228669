use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::RequirementList;

/// Content type declared for a markdown long description.
pub const README_CONTENT_TYPE: &str = "text/markdown";

/// The aggregate metadata record handed to a packaging toolchain.
///
/// A descriptor is built once from the project's assets and never mutated.
/// Field names match the keyword arguments of the toolchain's setup entry
/// point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    /// The distribution name.
    pub name: String,
    /// The package version, when a version asset is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// One-line summary.
    pub description: String,
    /// Project home page.
    pub url: String,
    /// Stripped README content.
    pub long_description: String,
    /// Content type of [`Self::long_description`].
    pub long_description_content_type: String,
    /// Author's display name.
    pub author: String,
    /// Author's contact address.
    pub author_email: String,
    /// Interpreter version constraint.
    pub python_requires: String,
    /// Dotted names of the discovered packages.
    pub packages: Vec<String>,
    /// The primary requirement list.
    pub install_requires: RequirementList,
    /// Extras groups and their requirement lists.
    pub extras_require: BTreeMap<String, RequirementList>,
}

impl PackageDescriptor {
    /// Renders the descriptor as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the descriptor as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> PackageDescriptor {
        PackageDescriptor {
            name: "fMRI Preprocessing".to_string(),
            version: None,
            description: "preprocessing".to_string(),
            url: String::new(),
            long_description: "# fMRI".to_string(),
            long_description_content_type: README_CONTENT_TYPE.to_string(),
            author: "Alix L.".to_string(),
            author_email: "alix@example.org".to_string(),
            python_requires: ">=3.8".to_string(),
            packages: vec!["app".to_string(), "app.sub".to_string()],
            install_requires: RequirementList::parse("nipype\nnumpy"),
            extras_require: BTreeMap::from([(
                "test".to_string(),
                RequirementList::parse("pytest"),
            )]),
        }
    }

    #[test]
    fn json_uses_setup_keywords() {
        let json: serde_json::Value = serde_json::from_str(&descriptor().to_json().unwrap()).unwrap();

        assert_eq!(json["long_description_content_type"], "text/markdown");
        assert_eq!(json["install_requires"], serde_json::json!(["nipype", "numpy"]));
        assert_eq!(json["extras_require"]["test"], serde_json::json!(["pytest"]));
        assert_eq!(json["python_requires"], ">=3.8");
        assert!(json.get("version").is_none());
    }

    #[test]
    fn toml_includes_version_when_present() {
        let mut descriptor = descriptor();
        descriptor.version = Some("0.1.0".to_string());

        let rendered = descriptor.to_toml().unwrap();
        let parsed: toml::Table = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed["version"].as_str(), Some("0.1.0"));
        assert_eq!(parsed["name"].as_str(), Some("fMRI Preprocessing"));
        assert_eq!(
            parsed["extras_require"]["test"].as_array().map(Vec::len),
            Some(1)
        );
    }
}
