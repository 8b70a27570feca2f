// Shared helpers for integration tests.
//
// Provides a temporary directory laid out like a dotfiles checkout (a `dots/`
// source tree, a fake `home/`, and a mapping file) plus a fluent builder so
// each test can set up an isolated environment without repeating filesystem
// boilerplate.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotman::commands::link::LinkOpts;
use dotman::paths::PathResolver;

/// An isolated dotfiles checkout backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory acting as both the working directory and the
    /// parent of the fake home directory.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create an empty context with `dots/` and `home/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("dots")).expect("create dots dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        Self { root }
    }

    /// Absolute path of `rel` inside the context.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Resolver using `home/` as `~` and the context root as the working
    /// directory.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.path("home"), self.root.path().to_path_buf())
    }

    /// Link options pointing at the context's `config.yaml`.
    pub fn opts(&self, force: bool) -> LinkOpts {
        LinkOpts {
            config: self.path("config.yaml"),
            force,
            dry_run: false,
        }
    }

    /// Returns `true` if `link` is a symlink pointing exactly at `target`.
    pub fn is_link_to(&self, link: &str, target: &str) -> bool {
        std::fs::read_link(self.path(link)).is_ok_and(|t| t == self.path(target))
    }

    /// Returns `true` if nothing at all exists at `rel`.
    pub fn is_absent(&self, rel: &str) -> bool {
        self.path(rel).symlink_metadata().is_err()
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new, empty context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write the mapping file.
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(self.ctx.path("config.yaml"), content).expect("write config");
        self
    }

    /// Create a file (and its parents) at `rel`.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.ctx.path(rel), content);
        self
    }

    /// Create an empty directory at `rel`.
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.ctx.path(rel)).expect("create dir");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, content).expect("write file");
}
