use crate::options::{RunMode, RunOptions};
use crate::validate::{ensure_output_outside_projects, validate};
use crate::Result;
use chrono::NaiveDate;
use consolidate_engine::{
    Crawler, DateResolver, DecisionProvider, DestinationPlanner, IdentityResolver, IdentitySource,
    IgnoreSet, Logger, Manifest, ManifestWriter, PrimarySelector, ProgressSink, ProjectIndex,
    Transferer,
};
use consolidate_types::{LayoutMode, LogLevel, ProjectInstance, TransferMode};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunProgress {
    ScanStarted {
        root: PathBuf,
    },
    ProjectDiscovered {
        path: PathBuf,
        key: String,
        synthetic: bool,
        date: NaiveDate,
    },
    ScanCompleted {
        projects: usize,
        groups: usize,
        duplicate_groups: usize,
    },
    PrimariesSelected {
        groups: usize,
    },
    LayoutResolved {
        layout: LayoutMode,
    },
    TransferStarted {
        source: PathBuf,
        destination: PathBuf,
        position: usize,
        total: usize,
    },
    TransferFinished {
        source: PathBuf,
        transferred: usize,
        failures: usize,
    },
    ManifestWritten {
        path: PathBuf,
    },
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub projects: usize,
    pub groups: usize,
    pub duplicate_groups: usize,
    /// Projects transferred without any failing entry
    pub migrated: usize,
    /// Projects with at least one failing entry
    pub failed: Vec<PathBuf>,
    pub layout: Option<LayoutMode>,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

/// Drives one consolidation run: crawl, group, select, plan, transfer, record.
pub struct ConsolidationService<'a> {
    options: &'a RunOptions,
    logger: &'a dyn Logger,
}

impl<'a> ConsolidationService<'a> {
    pub fn new(options: &'a RunOptions, logger: &'a dyn Logger) -> Self {
        Self { options, logger }
    }

    pub fn run<F>(
        &self,
        decisions: &mut dyn DecisionProvider,
        progress: &mut dyn ProgressSink,
        mut on_event: F,
    ) -> Result<RunReport>
    where
        F: FnMut(RunProgress),
    {
        validate(self.options)?;

        let options = self.options;
        self.logger.log(
            LogLevel::System,
            &format!(
                "Run started: root={} mode={}",
                options.root.display(),
                match &options.mode {
                    RunMode::MapOnly => "map-only".to_string(),
                    RunMode::Migrate { out, transfer } =>
                        format!("{} to {}", transfer, out.display()),
                }
            ),
        );
        if let Err(err) = self.logger.flush() {
            tracing::warn!("Failed to write run log: {}", err);
        }

        let ignore = IgnoreSet::new(&options.ignore_patterns)?;
        let mut index = self.discover(&ignore, &mut on_event);
        if let Some(out) = options.out_dir() {
            ensure_output_outside_projects(&index, out)?;
        }

        on_event(RunProgress::ScanCompleted {
            projects: index.project_count(),
            groups: index.len(),
            duplicate_groups: index.duplicate_group_count(),
        });
        self.logger.info(&format!(
            "Discovered {} projects in {} groups",
            index.project_count(),
            index.len()
        ));

        PrimarySelector::new(options.interactive).select(&mut index, decisions)?;
        on_event(RunProgress::PrimariesSelected {
            groups: index.len(),
        });

        let mut migrated = 0;
        let mut failed = Vec::new();
        let mut layout = None;

        if let RunMode::Migrate { out, transfer } = &options.mode {
            let chosen = self.resolve_layout(decisions)?;
            layout = Some(chosen);
            on_event(RunProgress::LayoutResolved { layout: chosen });

            DestinationPlanner::new(out, chosen, options.collisions).plan(&mut index)?;

            let (ok, failures) = self.transfer_all(&index, *transfer, progress, &mut on_event);
            migrated = ok;
            failed = failures;
        }

        let manifest = Manifest::snapshot(&index, !options.is_map_only());
        ManifestWriter.write(&manifest, &options.manifest_path)?;
        on_event(RunProgress::ManifestWritten {
            path: options.manifest_path.clone(),
        });

        self.logger.log(
            LogLevel::System,
            &format!(
                "Run finished: {} projects, {} groups, {} migrated, {} failed",
                index.project_count(),
                index.len(),
                migrated,
                failed.len()
            ),
        );
        if let Err(err) = self.logger.flush() {
            tracing::warn!("Failed to write run log: {}", err);
        }

        Ok(RunReport {
            projects: index.project_count(),
            groups: index.len(),
            duplicate_groups: index.duplicate_group_count(),
            migrated,
            failed,
            layout,
            manifest_path: options.manifest_path.clone(),
            manifest,
        })
    }

    fn discover<F>(&self, ignore: &IgnoreSet, on_event: &mut F) -> ProjectIndex
    where
        F: FnMut(RunProgress),
    {
        let options = self.options;
        let mut crawler = Crawler::new(ignore, self.logger).exclude(&options.manifest_path);
        let mut dates =
            DateResolver::new(options.date_strategy, ignore).exclude(&options.manifest_path);
        if let Some(out) = options.out_dir() {
            crawler = crawler.exclude(out);
        }
        for path in &options.excluded_paths {
            crawler = crawler.exclude(path);
            dates = dates.exclude(path);
        }
        let mut identities = IdentityResolver::new();
        let mut index = ProjectIndex::new();

        on_event(RunProgress::ScanStarted {
            root: options.root.clone(),
        });

        for project in crawler.crawl(&options.root) {
            let identity = identities.resolve(&project, self.logger);
            let date = dates.resolve(&project.path, self.logger);

            self.logger.info(&format!(
                "Project {} ({}) -> {}",
                project.path.display(),
                project.marker.kind.label(),
                identity.key
            ));
            on_event(RunProgress::ProjectDiscovered {
                path: project.path.clone(),
                key: identity.key.to_string(),
                synthetic: identity.source == IdentitySource::Synthetic,
                date,
            });

            index.insert(ProjectInstance::new(project.path, identity.key, date));
        }

        index
    }

    fn resolve_layout(&self, decisions: &mut dyn DecisionProvider) -> Result<LayoutMode> {
        if let Some(layout) = self.options.layout {
            return Ok(layout);
        }
        if !self.options.interactive {
            return Ok(LayoutMode::default());
        }

        let dated =
            decisions.ask_yes_no("Organize destinations by year (Out/<year>/<name>)?", true)?;
        Ok(if dated {
            LayoutMode::Dated
        } else {
            LayoutMode::Flat
        })
    }

    /// Primary first, then versions, group by group
    fn transfer_all<F>(
        &self,
        index: &ProjectIndex,
        mode: TransferMode,
        progress: &mut dyn ProgressSink,
        on_event: &mut F,
    ) -> (usize, Vec<PathBuf>)
    where
        F: FnMut(RunProgress),
    {
        let transferer =
            Transferer::new(mode, self.logger).with_progress_depth(self.options.progress_depth);
        let total = index.project_count();
        let mut migrated = 0;
        let mut failed = Vec::new();

        let ordered = index
            .groups()
            .flat_map(|group| group.primary().into_iter().chain(group.secondaries()));

        for (position, instance) in ordered.enumerate() {
            let Some(destination) = &instance.destination_path else {
                continue;
            };
            on_event(RunProgress::TransferStarted {
                source: instance.source_path.clone(),
                destination: destination.clone(),
                position: position + 1,
                total,
            });

            let report = transferer.transfer(&instance.source_path, destination, progress);
            on_event(RunProgress::TransferFinished {
                source: instance.source_path.clone(),
                transferred: report.transferred,
                failures: report.failures.len(),
            });

            if report.is_clean() {
                migrated += 1;
                self.logger.info(&describe_transfer(mode, &instance.source_path, destination));
            } else {
                self.logger.error(&format!(
                    "{} finished with {} failed entries",
                    instance.source_path.display(),
                    report.failures.len()
                ));
                failed.push(instance.source_path.clone());
            }
        }

        (migrated, failed)
    }
}

fn describe_transfer(mode: TransferMode, source: &Path, destination: &Path) -> String {
    let verb = match mode {
        TransferMode::Move => "Moved",
        TransferMode::Copy => "Copied",
    };
    format!("{} {} -> {}", verb, source.display(), destination.display())
}
