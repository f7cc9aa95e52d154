use consolidate_types::{Marker, MarkerKind};
use std::path::Path;

pub const PACKAGE_MANIFEST: &str = "package.json";
pub const DEPENDENCY_LIST: &str = "requirements.txt";
pub const SOLUTION_EXTENSIONS: &[&str] = &["sln", "csproj", "vcxproj", "pyproj"];
pub const DOCUMENTATION: &str = "README.md";

/// Find the marker that qualifies `dir` as a project.
///
/// `file_names` are the regular files directly inside `dir`. Rules are tried
/// in priority order and the first rule with a match wins. Among several
/// solution files the lexicographically smallest name is used.
pub fn detect_marker(dir: &Path, file_names: &[String]) -> Option<Marker> {
    if file_names.iter().any(|n| n == PACKAGE_MANIFEST) {
        return Some(Marker::new(
            MarkerKind::PackageManifest,
            dir.join(PACKAGE_MANIFEST),
        ));
    }

    if file_names.iter().any(|n| n == DEPENDENCY_LIST) {
        return Some(Marker::new(
            MarkerKind::DependencyList,
            dir.join(DEPENDENCY_LIST),
        ));
    }

    if let Some(solution) = file_names
        .iter()
        .filter(|n| has_solution_extension(n))
        .min()
    {
        return Some(Marker::new(MarkerKind::SolutionFile, dir.join(solution)));
    }

    file_names
        .iter()
        .filter(|n| n.eq_ignore_ascii_case(DOCUMENTATION))
        .min()
        .map(|readme| Marker::new(MarkerKind::Documentation, dir.join(readme)))
}

fn has_solution_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SOLUTION_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
