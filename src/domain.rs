//! Domain models for package metadata.
//!
//! This module contains the pure types: text encodings, requirement lists,
//! the package descriptor and the project configuration.

mod config;
pub use config::{Config, InvalidConfigError};

/// Text encodings understood when reading assets.
pub mod encoding;
pub use encoding::{DecodeError, Encoding, UnknownEncodingError};

/// Requirement lists parsed from requirements files.
pub mod requirement_list;
pub use requirement_list::{is_requirement_line, RequirementList};

mod descriptor;
pub use descriptor::{PackageDescriptor, README_CONTENT_TYPE};
