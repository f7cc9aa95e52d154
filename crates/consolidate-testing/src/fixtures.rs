//! Marker contents and timestamps used to build sample shares.

use anyhow::Result;
use filetime::{FileTime, set_file_mtime};
use std::path::Path;
use walkdir::WalkDir;

/// 2019-02-03T12:00:00Z
pub const TS_2019: i64 = 1_549_195_200;
/// 2021-06-15T12:00:00Z
pub const TS_2021: i64 = 1_623_758_400;
/// 2023-09-01T12:00:00Z
pub const TS_2023: i64 = 1_693_569_600;

/// `package.json` declaring `name`
pub fn package_json(name: &str) -> String {
    format!("{{\n  \"name\": \"{}\",\n  \"version\": \"1.0.0\"\n}}\n", name)
}

pub fn requirements_txt(packages: &[&str]) -> String {
    packages.iter().map(|p| format!("{}\n", p)).collect()
}

pub fn license(year: i32, holder: &str) -> String {
    format!("MIT License\n\nCopyright (c) {} {}\n", year, holder)
}

/// Set the modification time of every file below `dir`
pub fn set_tree_mtime(dir: &Path, unix_secs: i64) -> Result<()> {
    let time = FileTime::from_unix_time(unix_secs, 0);
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() {
            set_file_mtime(entry.path(), time)?;
        }
    }
    Ok(())
}
