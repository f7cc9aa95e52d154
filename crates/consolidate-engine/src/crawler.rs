use crate::logger::Logger;
use crate::markers::detect_marker;
use crate::Result;
use consolidate_types::{Marker, normalize_path};
use regex::RegexSet;
use std::path::{Path, PathBuf};

/// Directory names skipped together with everything below them
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    r"^\.git$",
    r"^\.svn$",
    r"^\.hg$",
    r"^\.vs$",
    r"^\.vscode$",
    r"^\.idea$",
    r"^node_modules$",
    r"^bower_components$",
    r"^__pycache__$",
    r"^\.venv$",
    r"^\.mypy_cache$",
    r"^\.pytest_cache$",
    r"^\.gradle$",
    r"^\.versions$",
];

/// Compiled ignore patterns, matched against directory names
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    patterns: RegexSet,
}

impl IgnoreSet {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            patterns: RegexSet::new(patterns)?,
        })
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_IGNORE_PATTERNS).expect("default ignore patterns are valid")
    }

    pub fn is_ignored(&self, dir: &Path) -> bool {
        dir.file_name()
            .map(|name| self.patterns.is_match(&name.to_string_lossy()))
            .unwrap_or(false)
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// A leaf project directory and the marker that qualified it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredProject {
    pub path: PathBuf,
    pub marker: Marker,
}

/// Finds project directories below a root.
///
/// A project's own subtree is never searched, so projects never nest.
pub struct Crawler<'a> {
    ignore: &'a IgnoreSet,
    excluded: Vec<PathBuf>,
    logger: &'a dyn Logger,
}

impl<'a> Crawler<'a> {
    pub fn new(ignore: &'a IgnoreSet, logger: &'a dyn Logger) -> Self {
        Self {
            ignore,
            excluded: Vec::new(),
            logger,
        }
    }

    /// Never enter or consider `path` (e.g. an output directory located under
    /// the root, or this run's manifest)
    pub fn exclude(mut self, path: &Path) -> Self {
        self.excluded.push(normalize_path(path));
        self
    }

    pub fn crawl(&self, root: &Path) -> Crawl<'_, 'a> {
        Crawl {
            crawler: self,
            stack: vec![normalize_path(root)],
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|excluded| excluded == path)
    }
}

/// Lazy depth-first walk driven by an explicit worklist
pub struct Crawl<'c, 'a> {
    crawler: &'c Crawler<'a>,
    stack: Vec<PathBuf>,
}

impl Iterator for Crawl<'_, '_> {
    type Item = DiscoveredProject;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(dir) = self.stack.pop() {
            let entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(err) => {
                    self.crawler.logger.warn(&format!(
                        "Skipping unreadable directory {}: {}",
                        dir.display(),
                        err
                    ));
                    continue;
                }
            };

            let mut files = Vec::new();
            let mut subdirs = Vec::new();
            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        self.crawler.logger.warn(&format!(
                            "Skipping unreadable entry in {}: {}",
                            dir.display(),
                            err
                        ));
                        continue;
                    }
                };
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                if file_type.is_file() {
                    if self.crawler.is_excluded(&entry.path()) {
                        continue;
                    }
                    files.push(entry.file_name().to_string_lossy().to_string());
                } else if file_type.is_dir() {
                    subdirs.push(entry.path());
                }
            }

            if let Some(marker) = detect_marker(&dir, &files) {
                return Some(DiscoveredProject { path: dir, marker });
            }

            // Reverse so the smallest name is popped first
            subdirs.sort();
            for subdir in subdirs.into_iter().rev() {
                if self.crawler.ignore.is_ignored(&subdir) || self.crawler.is_excluded(&subdir) {
                    continue;
                }
                self.stack.push(subdir);
            }
        }

        None
    }
}
