use crate::config::Config;
use consolidate_types::{CollisionPolicy, DateStrategy, LayoutMode, TransferMode};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Discover and write the manifest without touching any project
    MapOnly,
    /// Relocate every instance under `out`
    Migrate { out: PathBuf, transfer: TransferMode },
}

/// Everything one run needs, merged from the config file and command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub root: PathBuf,
    pub mode: RunMode,
    pub manifest_path: PathBuf,
    pub overwrite: bool,
    pub interactive: bool,
    pub layout: Option<LayoutMode>,
    pub date_strategy: DateStrategy,
    pub collisions: CollisionPolicy,
    pub ignore_patterns: Vec<String>,
    pub progress_depth: usize,
    /// Files the crawl and dating leave alone besides the manifest (e.g. the run log)
    pub excluded_paths: Vec<PathBuf>,
}

impl RunOptions {
    pub fn map_only(
        root: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
        config: &Config,
    ) -> Self {
        Self::from_config(root.into(), RunMode::MapOnly, manifest_path.into(), config)
    }

    pub fn migrate(
        root: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
        transfer: TransferMode,
        manifest_path: impl Into<PathBuf>,
        config: &Config,
    ) -> Self {
        let mode = RunMode::Migrate {
            out: out.into(),
            transfer,
        };
        Self::from_config(root.into(), mode, manifest_path.into(), config)
    }

    fn from_config(root: PathBuf, mode: RunMode, manifest_path: PathBuf, config: &Config) -> Self {
        Self {
            root,
            mode,
            manifest_path,
            overwrite: false,
            interactive: false,
            layout: config.layout.mode,
            date_strategy: config.dates.strategy,
            collisions: config.plan.collisions,
            ignore_patterns: config.crawl.ignore_patterns.clone(),
            progress_depth: config.transfer.progress_depth,
            excluded_paths: Vec::new(),
        }
    }

    pub fn is_map_only(&self) -> bool {
        self.mode == RunMode::MapOnly
    }

    pub fn out_dir(&self) -> Option<&PathBuf> {
        match &self.mode {
            RunMode::MapOnly => None,
            RunMode::Migrate { out, .. } => Some(out),
        }
    }
}
