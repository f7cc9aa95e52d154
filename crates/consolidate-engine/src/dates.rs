use crate::crawler::IgnoreSet;
use crate::logger::Logger;
use chrono::{Datelike, NaiveDate};
use consolidate_types::{DateStrategy, date_from_system_time, normalize_path};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Files searched for a copyright year, in order
pub const COPYRIGHT_CANDIDATES: &[&str] = &["LICENSE", "LICENSE.md", "LICENSE.txt", "index.html"];

static COPYRIGHT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)copyright[^\d\n]*(\d{4})").expect("valid regex"));

/// Picks the date that ranks versions of a project
pub struct DateResolver<'a> {
    strategy: DateStrategy,
    ignore: &'a IgnoreSet,
    excluded: Vec<PathBuf>,
}

impl<'a> DateResolver<'a> {
    pub fn new(strategy: DateStrategy, ignore: &'a IgnoreSet) -> Self {
        Self {
            strategy,
            ignore,
            excluded: Vec::new(),
        }
    }

    /// Leave `path` out of the newest-file search (e.g. this run's manifest or log)
    pub fn exclude(mut self, path: &Path) -> Self {
        self.excluded.push(normalize_path(path));
        self
    }

    pub fn resolve(&self, project_dir: &Path, logger: &dyn Logger) -> NaiveDate {
        if self.strategy == DateStrategy::Content
            && let Some(date) = copyright_date(project_dir, logger)
        {
            return date;
        }

        if let Some(newest) = newest_modification(project_dir, self.ignore, &self.excluded, logger) {
            return date_from_system_time(newest);
        }

        match std::fs::metadata(project_dir).and_then(|m| m.modified()) {
            Ok(modified) => date_from_system_time(modified),
            Err(err) => {
                logger.warn(&format!(
                    "No usable timestamp for {} ({}); dating it 1970-01-01",
                    project_dir.display(),
                    err
                ));
                NaiveDate::default()
            }
        }
    }
}

/// January 1 of the first copyright year found in the candidate files
pub fn copyright_date(project_dir: &Path, logger: &dyn Logger) -> Option<NaiveDate> {
    for candidate in COPYRIGHT_CANDIDATES {
        let path = project_dir.join(candidate);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => {
                logger.warn(&format!("Cannot read {}: {}", path.display(), err));
                continue;
            }
        };

        let text = String::from_utf8_lossy(&bytes);
        if let Some(year) = find_copyright_year(&text)
            && let Some(date) = NaiveDate::from_ymd_opt(year, 1, 1)
        {
            return Some(date);
        }
    }
    None
}

pub fn find_copyright_year(text: &str) -> Option<i32> {
    COPYRIGHT_YEAR
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<i32>().ok())
        .find(|year| (1970..=chrono::Utc::now().year() + 1).contains(year))
}

/// Latest modification time of any file below `dir`.
///
/// Ignored subtrees and `excluded` paths (normalized) are skipped.
pub fn newest_modification(
    dir: &Path,
    ignore: &IgnoreSet,
    excluded: &[PathBuf],
    logger: &dyn Logger,
) -> Option<SystemTime> {
    let mut newest: Option<SystemTime> = None;

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            if e.file_type().is_dir() && ignore.is_ignored(e.path()) {
                return false;
            }
            !excluded.iter().any(|path| path == e.path())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                logger.warn(&format!("Skipping entry while dating {}: {}", dir.display(), err));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata().map_err(std::io::Error::from).and_then(|m| m.modified()) {
            Ok(modified) => {
                if newest.is_none_or(|current| modified > current) {
                    newest = Some(modified);
                }
            }
            Err(err) => logger.warn(&format!(
                "Cannot read timestamp of {}: {}",
                entry.path().display(),
                err
            )),
        }
    }

    newest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NullLogger;
    use filetime::{FileTime, set_file_mtime};
    use std::fs;
    use tempfile::TempDir;

    // 2021-03-04T12:00:00Z
    const MARCH_2021: i64 = 1_614_859_200;
    // 2023-07-15T12:00:00Z
    const JULY_2023: i64 = 1_689_422_400;

    fn write_with_mtime(path: &Path, secs: i64) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "data").unwrap();
        set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    #[test]
    fn test_find_copyright_year() {
        assert_eq!(find_copyright_year("Copyright (c) 2019 Jane"), Some(2019));
        assert_eq!(find_copyright_year("COPYRIGHT 2015-2021 Acme"), Some(2015));
        assert_eq!(find_copyright_year("<p>&copy; Copyright 2012</p>"), Some(2012));
        assert_eq!(find_copyright_year("MIT License, 2019"), None);
        assert_eq!(find_copyright_year("Copyright\n2019"), None);
    }

    #[test]
    fn test_filesystem_strategy_uses_newest_file() {
        let temp = TempDir::new().unwrap();
        write_with_mtime(&temp.path().join("a.txt"), MARCH_2021);
        write_with_mtime(&temp.path().join("src/deep/b.txt"), JULY_2023);

        let ignore = IgnoreSet::defaults();
        let date = DateResolver::new(DateStrategy::Filesystem, &ignore)
            .resolve(temp.path(), &NullLogger);
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 7, 15).unwrap());
    }

    #[test]
    fn test_ignored_subtrees_do_not_count() {
        let temp = TempDir::new().unwrap();
        write_with_mtime(&temp.path().join("main.py"), MARCH_2021);
        write_with_mtime(&temp.path().join("node_modules/x/index.js"), JULY_2023);

        let ignore = IgnoreSet::defaults();
        let date = DateResolver::new(DateStrategy::Filesystem, &ignore)
            .resolve(temp.path(), &NullLogger);
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
    }

    #[test]
    fn test_excluded_files_do_not_count() {
        let temp = TempDir::new().unwrap();
        let project = normalize_path(temp.path());
        write_with_mtime(&project.join("main.py"), MARCH_2021);
        write_with_mtime(&project.join("manifest.json"), JULY_2023);
        write_with_mtime(&project.join("consolidate.log"), JULY_2023);

        let ignore = IgnoreSet::defaults();
        let date = DateResolver::new(DateStrategy::Filesystem, &ignore)
            .exclude(&temp.path().join("manifest.json"))
            .exclude(&temp.path().join("consolidate.log"))
            .resolve(&project, &NullLogger);
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
    }

    #[test]
    fn test_content_strategy_prefers_copyright() {
        let temp = TempDir::new().unwrap();
        write_with_mtime(&temp.path().join("main.py"), JULY_2023);
        fs::write(temp.path().join("LICENSE"), "Copyright (c) 2018 Someone").unwrap();

        let ignore = IgnoreSet::defaults();
        let date = DateResolver::new(DateStrategy::Content, &ignore)
            .resolve(temp.path(), &NullLogger);
        assert_eq!(date, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
    }

    #[test]
    fn test_content_strategy_falls_back_to_filesystem() {
        let temp = TempDir::new().unwrap();
        write_with_mtime(&temp.path().join("main.py"), MARCH_2021);
        write_with_mtime(&temp.path().join("LICENSE"), MARCH_2021);

        let ignore = IgnoreSet::defaults();
        let date = DateResolver::new(DateStrategy::Content, &ignore)
            .resolve(temp.path(), &NullLogger);
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
    }
}
