//! Python package descriptors from plain-text project assets
//!
//! A project directory holds a README, requirements files and a tree of
//! Python packages. This crate reads them and assembles the metadata record
//! handed to an external packaging toolchain.

pub mod domain;
pub use domain::{Config, Encoding, PackageDescriptor, RequirementList};

/// Filesystem access: text assets, package discovery and descriptor assembly.
pub mod storage;
pub use storage::{
    build_package_descriptor, find_packages, load_config, AssetError, BuildError, Discovery,
    ProjectRoot,
};
