use consolidate_runtime::{RunProgress, RunReport};
use owo_colors::OwoColorize;

fn bold(text: &str, color: bool) -> String {
    if color { text.bold().to_string() } else { text.to_string() }
}

fn dim(text: &str, color: bool) -> String {
    if color { text.dimmed().to_string() } else { text.to_string() }
}

fn green(text: &str, color: bool) -> String {
    if color { text.green().to_string() } else { text.to_string() }
}

fn yellow(text: &str, color: bool) -> String {
    if color { text.yellow().to_string() } else { text.to_string() }
}

fn red(text: &str, color: bool) -> String {
    if color { text.red().to_string() } else { text.to_string() }
}

/// Console line for a run event; `None` for events the summary covers
pub fn event_line(event: &RunProgress, color: bool) -> Option<String> {
    match event {
        RunProgress::ScanStarted { root } => {
            Some(bold(&format!("Scanning {}", root.display()), color))
        }
        RunProgress::ProjectDiscovered {
            path,
            key,
            synthetic,
            date,
        } => {
            let line = dim(&format!("  {} ({}) {}", path.display(), date, key), color);
            if *synthetic {
                Some(format!("{} {}", line, yellow("[marker unreadable]", color)))
            } else {
                Some(line)
            }
        }
        RunProgress::ScanCompleted {
            projects,
            groups,
            duplicate_groups,
        } => Some(format!(
            "Found {} projects in {} groups ({} with duplicates)",
            projects, groups, duplicate_groups
        )),
        RunProgress::PrimariesSelected { .. } => None,
        RunProgress::LayoutResolved { layout } => Some(format!("Layout: {}", layout)),
        RunProgress::TransferStarted {
            source,
            destination,
            position,
            total,
        } => Some(format!(
            "[{}/{}] {} -> {}",
            position,
            total,
            source.display(),
            destination.display()
        )),
        RunProgress::TransferFinished { failures, .. } if *failures > 0 => Some(red(
            &format!("  {} entries failed, see the run log", failures),
            color,
        )),
        RunProgress::TransferFinished { .. } => None,
        RunProgress::ManifestWritten { .. } => None,
    }
}

pub fn summary(report: &RunReport, color: bool) -> String {
    let mut lines = vec![
        String::new(),
        bold("Summary", color),
        format!(
            "  Projects: {} in {} groups ({} with duplicates)",
            report.projects, report.groups, report.duplicate_groups
        ),
    ];

    if let Some(layout) = report.layout {
        lines.push(format!("  Layout:   {}", layout));
        let migrated = format!("{} migrated", report.migrated);
        if report.failed.is_empty() {
            lines.push(format!("  Result:   {}", green(&migrated, color)));
        } else {
            lines.push(format!(
                "  Result:   {}, {}",
                migrated,
                red(&format!("{} failed", report.failed.len()), color)
            ));
            for path in &report.failed {
                lines.push(format!("    {}", path.display()));
            }
        }
    }

    lines.push(format!("  Manifest: {}", report.manifest_path.display()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use consolidate_engine::Manifest;
    use consolidate_types::LayoutMode;
    use std::path::PathBuf;

    fn report() -> RunReport {
        RunReport {
            projects: 3,
            groups: 2,
            duplicate_groups: 1,
            migrated: 2,
            failed: vec![PathBuf::from("/share/B/tool")],
            layout: Some(LayoutMode::Dated),
            manifest_path: PathBuf::from("Out/manifest.json"),
            manifest: Manifest::default(),
        }
    }

    #[test]
    fn test_summary_lists_failures() {
        let text = summary(&report(), false);
        assert!(text.contains("Projects: 3 in 2 groups (1 with duplicates)"));
        assert!(text.contains("Layout:   dated"));
        assert!(text.contains("2 migrated, 1 failed"));
        assert!(text.contains("    /share/B/tool"));
        assert!(text.ends_with("Manifest: Out/manifest.json"));
    }

    #[test]
    fn test_map_only_summary_has_no_result_line() {
        let mut report = report();
        report.layout = None;
        report.migrated = 0;
        report.failed.clear();

        let text = summary(&report, false);
        assert!(!text.contains("Result:"));
        assert!(!text.contains("Layout:"));
    }

    #[test]
    fn test_event_lines() {
        let started = RunProgress::TransferStarted {
            source: PathBuf::from("/share/A/new"),
            destination: PathBuf::from("/Out/2023/new"),
            position: 1,
            total: 3,
        };
        assert_eq!(
            event_line(&started, false).unwrap(),
            "[1/3] /share/A/new -> /Out/2023/new"
        );

        let clean = RunProgress::TransferFinished {
            source: PathBuf::from("/share/A/new"),
            transferred: 4,
            failures: 0,
        };
        assert!(event_line(&clean, false).is_none());

        let synthetic = RunProgress::ProjectDiscovered {
            path: PathBuf::from("/share/C/locked"),
            key: "locked_20240101000000000_1".into(),
            synthetic: true,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(
            event_line(&synthetic, false)
                .unwrap()
                .ends_with("[marker unreadable]")
        );
    }
}
