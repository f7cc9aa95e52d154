use crate::logger::Logger;
use crate::progress::{ProgressSink, percent};
use consolidate_types::{TransferMode, leaf_name, normalize_path};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Levels below the project root reported entry by entry
pub const DEFAULT_PROGRESS_DEPTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one project transfer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Entries moved or copied (bulk-transferred subtrees count once)
    pub transferred: usize,
    pub failures: Vec<TransferFailure>,
}

impl TransferReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Moves or copies project trees.
///
/// Failures are recorded per entry and never stop the remaining entries.
/// Nothing is rolled back.
pub struct Transferer<'a> {
    mode: TransferMode,
    progress_depth: usize,
    logger: &'a dyn Logger,
}

impl<'a> Transferer<'a> {
    pub fn new(mode: TransferMode, logger: &'a dyn Logger) -> Self {
        Self {
            mode,
            progress_depth: DEFAULT_PROGRESS_DEPTH,
            logger,
        }
    }

    pub fn with_progress_depth(mut self, depth: usize) -> Self {
        self.progress_depth = depth;
        self
    }

    pub fn transfer(
        &self,
        source: &Path,
        destination: &Path,
        progress: &mut dyn ProgressSink,
    ) -> TransferReport {
        let mut report = TransferReport::default();
        let activity = match self.mode {
            TransferMode::Move => format!("Moving {}", leaf_name(source)),
            TransferMode::Copy => format!("Copying {}", leaf_name(source)),
        };

        if normalize_path(destination).starts_with(normalize_path(source)) {
            let err = io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("destination {} lies inside the source", destination.display()),
            );
            self.fail(&mut report, source, &err);
            return report;
        }

        if let Err(err) = fs::create_dir_all(destination) {
            self.fail(&mut report, source, &err);
            return report;
        }

        let mut level = Level {
            activity: &activity,
            root: source,
            progress,
            report: &mut report,
        };
        self.transfer_level(source, destination, 0, &mut level);

        if self.mode == TransferMode::Move {
            self.remove_emptied(source);
        }

        report
    }

    fn transfer_level(
        &self,
        source: &Path,
        destination: &Path,
        depth: usize,
        level: &mut Level<'_, '_>,
    ) {
        let entries = match fs::read_dir(source) {
            Ok(entries) => entries,
            Err(err) => {
                self.fail(level.report, source, &err);
                return;
            }
        };

        let mut entries: Vec<_> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    self.fail(level.report, source, &err);
                    None
                }
            })
            .collect();
        entries.sort_by_key(|e| e.file_name());

        let total = entries.len();
        for (i, entry) in entries.into_iter().enumerate() {
            let from = entry.path();
            let to = destination.join(entry.file_name());
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_dir && depth + 1 < self.progress_depth {
                match fs::create_dir_all(&to) {
                    Ok(()) => {
                        self.transfer_level(&from, &to, depth + 1, level);
                        if self.mode == TransferMode::Move {
                            self.remove_emptied(&from);
                        }
                    }
                    Err(err) => self.fail(level.report, &from, &err),
                }
            } else {
                match self.transfer_entry(&from, &to) {
                    Ok(()) => level.report.transferred += 1,
                    Err(err) => self.fail(level.report, &from, &err),
                }
            }

            let item = from
                .strip_prefix(level.root)
                .unwrap_or(&from)
                .to_string_lossy()
                .to_string();
            level
                .progress
                .report(level.activity, &item, percent(i + 1, total));
        }
    }

    fn transfer_entry(&self, from: &Path, to: &Path) -> io::Result<()> {
        if to.starts_with(from) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot transfer {} into itself", from.display()),
            ));
        }
        match self.mode {
            TransferMode::Copy => copy_entry(from, to),
            TransferMode::Move => {
                if fs::rename(from, to).is_ok() {
                    return Ok(());
                }
                // Cross-device or non-empty target: copy then delete
                copy_entry(from, to)?;
                if fs::symlink_metadata(from)?.is_dir() {
                    fs::remove_dir_all(from)
                } else {
                    fs::remove_file(from)
                }
            }
        }
    }

    fn remove_emptied(&self, dir: &Path) {
        if let Err(err) = fs::remove_dir(dir) {
            self.logger.warn(&format!(
                "Source directory {} not removed: {}",
                dir.display(),
                err
            ));
        }
    }

    fn fail(&self, report: &mut TransferReport, path: &Path, err: &io::Error) {
        self.logger
            .error(&format!("Transfer failed for {}: {}", path.display(), err));
        report.failures.push(TransferFailure {
            path: path.to_path_buf(),
            error: err.to_string(),
        });
    }
}

struct Level<'r, 'p> {
    activity: &'r str,
    root: &'r Path,
    progress: &'p mut dyn ProgressSink,
    report: &'r mut TransferReport,
}

/// Copy a file, symlink or whole directory tree to `to`
fn copy_entry(from: &Path, to: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(from)?;
    if !meta.is_dir() {
        return copy_leaf(from, to, &meta);
    }

    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from).map_err(io::Error::other)?;
        let target = to.join(relative);
        let meta = fs::symlink_metadata(entry.path())?;
        if meta.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_leaf(entry.path(), &target, &meta)?;
        }
    }
    Ok(())
}

fn copy_leaf(from: &Path, to: &Path, meta: &fs::Metadata) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    if meta.file_type().is_symlink() {
        let link = fs::read_link(from)?;
        if fs::symlink_metadata(to).is_ok() {
            fs::remove_file(to)?;
        }
        return std::os::unix::fs::symlink(link, to);
    }
    #[cfg(not(unix))]
    let _ = meta;

    fs::copy(from, to).map(|_| ())
}
