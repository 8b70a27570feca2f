//! `source : destination` mapping parser.
use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;

/// Field separator between source and destination.
const SEPARATOR: char = ':';

/// One line of the mapping file, with both fields trimmed but not resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// What the symlink should point to.
    pub source: String,
    /// Where the symlink is created.
    pub destination: String,
}

/// Ordered set of entries, in the order they appear in the file.
///
/// Destinations are unique by raw string. Sources may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
}

impl Mapping {
    /// Entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the file contained no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Read and parse the mapping file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, otherwise any error
/// from [`parse`].
pub fn load(path: &Path) -> Result<Mapping, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parse mapping file contents. `path` is only used in error messages.
///
/// Blank lines are skipped. Every other line must contain exactly one `:`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidFormat`] for a line with zero or several
/// separators and [`ConfigError::DuplicateDestination`] when a destination is
/// repeated.
pub fn parse(content: &str, path: &Path) -> Result<Mapping, ConfigError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((source, destination)) = split_line(line) else {
            return Err(ConfigError::InvalidFormat {
                line: idx + 1,
                path: path.to_path_buf(),
            });
        };

        if !seen.insert(destination) {
            return Err(ConfigError::DuplicateDestination(destination.to_string()));
        }

        entries.push(MappingEntry {
            source: source.to_string(),
            destination: destination.to_string(),
        });
    }

    Ok(Mapping { entries })
}

/// Split on the single separator and trim both halves.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (source, destination) = line.split_once(SEPARATOR)?;
    if destination.contains(SEPARATOR) {
        return None;
    }
    Some((source.trim(), destination.trim()))
}
