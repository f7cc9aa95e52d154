use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Final component of a path, or the whole path when it has none (e.g. `/`)
pub fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// UTC calendar date of a filesystem timestamp
pub fn date_from_system_time(time: SystemTime) -> NaiveDate {
    DateTime::<Utc>::from(time).date_naive()
}

/// ISO-8601 UTC timestamp at midnight, e.g. `2023-04-01T00:00:00Z`
pub fn iso_midnight_utc(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Normalize a path for comparison (resolve to absolute, canonicalize if possible).
///
/// For a path that does not exist yet, the longest existing ancestor is
/// canonicalized and the missing components are appended.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => return path.to_path_buf(),
        }
    };

    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    while let Some(parent) = existing.parent() {
        let Some(name) = existing.file_name() else {
            break;
        };
        missing.push(name.to_os_string());
        existing = parent;
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc, name| acc.join(name));
        }
    }

    absolute
}
