//! Filesystem primitives behind link reconciliation.
pub mod fs;
pub mod symlink;

pub use symlink::{DestinationState, LinkChange, SymlinkResource};
