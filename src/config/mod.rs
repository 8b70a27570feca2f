//! Mapping file loading and validation.
pub mod mapping;

pub use mapping::{Mapping, MappingEntry};

/// Default mapping file, looked up relative to the working directory.
///
/// The name is historical: the format is a plain `source : destination` list,
/// not YAML.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
