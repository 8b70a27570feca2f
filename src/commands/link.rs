//! The link run: load the mapping, then reconcile every entry in file order.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::config::{MappingEntry, mapping};
use crate::error::DotmanError;
use crate::logging::Logger;
use crate::paths::PathResolver;
use crate::prompt::{Confirm, Decision};
use crate::resources::{DestinationState, LinkChange, SymlinkResource};

/// Options for a link run.
#[derive(Debug, Clone)]
pub struct LinkOpts {
    /// Mapping file to read.
    pub config: PathBuf,
    /// Replace every existing destination without asking.
    pub force: bool,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

/// What happened to one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The destination was absent and is now a link.
    Linked,
    /// The destination was removed and replaced by a link.
    Replaced,
    /// The operator chose to keep the existing destination.
    Skipped,
    /// Dry run; nothing was changed.
    DryRun,
}

/// Per-entry result with resolved paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    /// Resolved source.
    pub source: PathBuf,
    /// Resolved destination.
    pub destination: PathBuf,
    /// What happened.
    pub outcome: Outcome,
}

/// Results of a completed run, in mapping order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// One report per mapping entry.
    pub entries: Vec<EntryReport>,
}

impl RunReport {
    /// Number of entries with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }
}

/// Run the link command.
///
/// The whole mapping is parsed before the first entry is touched, so a bad
/// file changes nothing on disk. After that the first failing entry aborts the
/// run; earlier entries stay linked.
///
/// # Errors
///
/// Returns an error if the mapping cannot be loaded, a destination cannot be
/// reconciled, or the operator's answer cannot be read.
pub fn run(
    opts: &LinkOpts,
    resolver: &PathResolver,
    confirm: &mut dyn Confirm,
    log: &Logger,
) -> Result<RunReport> {
    log.debug(&format!("dotman {}", crate::VERSION));
    log.debug(&format!("reading {}", opts.config.display()));

    let mapping = mapping::load(&opts.config)?;
    log.info(&format!(
        "loaded {} entries from {}",
        mapping.len(),
        opts.config.display()
    ));
    if mapping.is_empty() {
        log.warn("nothing to link");
    }
    if opts.force && !opts.dry_run {
        log.debug("force: existing destinations will be replaced without asking");
    }

    let mut report = RunReport::default();
    for entry in &mapping {
        let resource = resolve_entry(entry, resolver);
        log.debug(&format!(
            "{} : {} resolved to {}",
            entry.source,
            entry.destination,
            resource.description()
        ));

        let outcome = if opts.dry_run {
            preview(&resource, opts.force, log)
        } else {
            link_entry(&resource, opts.force, confirm, log)
        }
        .with_context(|| format!("linking {}", resource.description()))?;

        report.entries.push(EntryReport {
            source: resource.source,
            destination: resource.destination,
            outcome,
        });
    }

    if opts.dry_run {
        log.info(&format!(
            "{} entries checked, nothing changed",
            report.count(Outcome::DryRun)
        ));
    } else {
        log.info(&format!(
            "{} linked, {} replaced, {} skipped",
            report.count(Outcome::Linked),
            report.count(Outcome::Replaced),
            report.count(Outcome::Skipped)
        ));
    }
    if let Some(path) = log.log_path() {
        log.debug(&format!("log: {}", path.display()));
    }
    log.success("All done!");
    Ok(report)
}

fn resolve_entry(entry: &MappingEntry, resolver: &PathResolver) -> SymlinkResource {
    SymlinkResource::new(
        resolver.resolve(&entry.source),
        resolver.resolve(&entry.destination),
    )
}

/// Reconcile one entry, asking the operator when the destination is in the
/// way and `force` is off.
fn link_entry(
    resource: &SymlinkResource,
    force: bool,
    confirm: &mut dyn Confirm,
    log: &Logger,
) -> Result<Outcome, DotmanError> {
    match resource.reconcile(force) {
        Ok(change) => Ok(report_change(resource, change, log)),
        Err(e) if e.is_already_exists() => {
            match confirm.confirm_replace(&resource.source, &resource.destination)? {
                Decision::Replace => {
                    let change = resource.reconcile(true)?;
                    Ok(report_change(resource, change, log))
                }
                Decision::Skip => {
                    log.info(&format!("{} [Skipped]", resource.description()));
                    Ok(Outcome::Skipped)
                }
            }
        }
        Err(e) => Err(e.into()),
    }
}

fn report_change(resource: &SymlinkResource, change: LinkChange, log: &Logger) -> Outcome {
    match change {
        LinkChange::Created => {
            log.success(&resource.description());
            Outcome::Linked
        }
        LinkChange::Replaced => {
            log.success(&format!("{} [Replaced]", resource.description()));
            Outcome::Replaced
        }
    }
}

/// Describe what [`link_entry`] would do, without side effects.
fn preview(resource: &SymlinkResource, force: bool, log: &Logger) -> Result<Outcome, DotmanError> {
    let action = match resource.probe()? {
        DestinationState::Missing => "would link",
        DestinationState::Present if force => "would replace",
        DestinationState::Present => "would ask before replacing",
    };
    log.dry_run(&format!("{action} {}", resource.description()));
    Ok(Outcome::DryRun)
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::prompt::MockConfirm;
    use std::path::Path;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.dir.path().join(rel)
        }

        fn file(&self, rel: &str, content: &str) -> PathBuf {
            let path = self.path(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, content).unwrap();
            path
        }

        fn opts(&self, config: &str, force: bool, dry_run: bool) -> LinkOpts {
            LinkOpts {
                config: self.file("config.yaml", config),
                force,
                dry_run,
            }
        }

        fn resolver(&self) -> PathResolver {
            PathResolver::new(self.path("home"), self.dir.path().to_path_buf())
        }
    }

    fn no_prompt() -> MockConfirm {
        let mut confirm = MockConfirm::new();
        confirm.expect_confirm_replace().never();
        confirm
    }

    fn answering(decision: Decision) -> MockConfirm {
        let mut confirm = MockConfirm::new();
        confirm
            .expect_confirm_replace()
            .times(1)
            .returning(move |_, _| Ok(decision));
        confirm
    }

    fn is_link_to(link: &Path, target: &Path) -> bool {
        std::fs::read_link(link).is_ok_and(|t| t == target)
    }

    #[test]
    fn links_relative_and_home_paths() {
        let fx = Fixture::new();
        let bashrc = fx.file("dots/bashrc", "bash");
        let opts = fx.opts("dots/bashrc : ~/.bashrc\n", false, false);

        let report = run(&opts, &fx.resolver(), &mut no_prompt(), &Logger::default()).unwrap();

        assert_eq!(report.count(Outcome::Linked), 1);
        assert!(is_link_to(&fx.path("home/.bashrc"), &bashrc));
        assert_eq!(report.entries[0].destination, fx.path("home/.bashrc"));
    }

    #[test]
    fn skip_answer_leaves_destination_untouched() {
        let fx = Fixture::new();
        fx.file("dots/vimrc", "vim");
        let existing = fx.file("home/.vimrc", "mine");
        let opts = fx.opts("dots/vimrc: ~/.vimrc", false, false);

        let report = run(
            &opts,
            &fx.resolver(),
            &mut answering(Decision::Skip),
            &Logger::default(),
        )
        .unwrap();

        assert_eq!(report.entries[0].outcome, Outcome::Skipped);
        assert_eq!(std::fs::read_to_string(existing).unwrap(), "mine");
    }

    #[test]
    fn replace_answer_swaps_directory_for_link() {
        let fx = Fixture::new();
        let source = fx.file("dots/nvim/init.lua", "lua");
        fx.file("home/.config/nvim/old.vim", "old");
        let opts = fx.opts("dots/nvim: ~/.config/nvim", false, false);

        let report = run(
            &opts,
            &fx.resolver(),
            &mut answering(Decision::Replace),
            &Logger::default(),
        )
        .unwrap();

        assert_eq!(report.entries[0].outcome, Outcome::Replaced);
        assert!(is_link_to(
            &fx.path("home/.config/nvim"),
            source.parent().unwrap()
        ));
    }

    #[test]
    fn force_replaces_without_prompting() {
        let fx = Fixture::new();
        let source = fx.file("dots/gitconfig", "git");
        fx.file("home/.gitconfig", "mine");
        let opts = fx.opts("dots/gitconfig: ~/.gitconfig", true, false);

        let report = run(&opts, &fx.resolver(), &mut no_prompt(), &Logger::default()).unwrap();

        assert_eq!(report.entries[0].outcome, Outcome::Replaced);
        assert!(is_link_to(&fx.path("home/.gitconfig"), &source));
    }

    #[test]
    fn destination_removed_while_prompting_is_reported_as_linked() {
        let fx = Fixture::new();
        let source = fx.file("dots/a", "a");
        let existing = fx.file("home/a", "mine");
        let opts = fx.opts("dots/a: ~/a", false, false);
        let mut confirm = MockConfirm::new();
        confirm
            .expect_confirm_replace()
            .times(1)
            .returning(move |_, _| {
                std::fs::remove_file(&existing)?;
                Ok(Decision::Replace)
            });

        let report = run(&opts, &fx.resolver(), &mut confirm, &Logger::default()).unwrap();

        assert_eq!(report.entries[0].outcome, Outcome::Linked);
        assert!(is_link_to(&fx.path("home/a"), &source));
    }

    #[test]
    fn prompt_read_failure_aborts() {
        let fx = Fixture::new();
        fx.file("dots/a", "a");
        fx.file("home/a", "mine");
        let opts = fx.opts("dots/a: ~/a", false, false);
        let mut confirm = MockConfirm::new();
        confirm
            .expect_confirm_replace()
            .returning(|_, _| Err(std::io::Error::other("stdin closed")));

        let err = run(&opts, &fx.resolver(), &mut confirm, &Logger::default()).unwrap_err();

        assert!(format!("{err:#}").contains("cannot read answer"));
    }

    #[test]
    fn dry_run_changes_nothing_and_never_prompts() {
        let fx = Fixture::new();
        fx.file("dots/a", "a");
        fx.file("dots/b", "b");
        fx.file("home/b", "mine");
        let opts = fx.opts("dots/a: ~/a\ndots/b: ~/b\n", false, true);

        let report = run(&opts, &fx.resolver(), &mut no_prompt(), &Logger::default()).unwrap();

        assert_eq!(report.count(Outcome::DryRun), 2);
        assert!(fx.path("home/a").symlink_metadata().is_err());
        assert_eq!(std::fs::read_to_string(fx.path("home/b")).unwrap(), "mine");
    }

    #[test]
    fn parse_error_aborts_before_any_link() {
        let fx = Fixture::new();
        fx.file("dots/a", "a");
        let opts = fx.opts("dots/a: ~/a\nbroken line\n", false, false);

        let err = run(&opts, &fx.resolver(), &mut no_prompt(), &Logger::default()).unwrap_err();

        assert!(err.to_string().contains("line 2"));
        assert!(fx.path("home/a").symlink_metadata().is_err());
    }

    #[test]
    fn entries_are_reported_in_file_order() {
        let fx = Fixture::new();
        let opts = fx.opts("z: ~/z\na: ~/a\nm: ~/m\n", false, false);

        let report = run(&opts, &fx.resolver(), &mut no_prompt(), &Logger::default()).unwrap();

        let names: Vec<_> = report
            .entries
            .iter()
            .map(|e| e.destination.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["z", "a", "m"]);
    }
}
