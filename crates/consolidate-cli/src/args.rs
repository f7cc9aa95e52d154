use crate::types::{Collisions, DateSource, Layout, LogLevel};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "consolidate")]
#[command(about = "Find duplicated project folders and reorganize them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: CONSOLIDATE_CONFIG or the system config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Console verbosity; the run log always records everything
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[arg(long, default_value = "consolidate.log", global = true)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover projects and write the manifest without moving anything
    Scan(ScanArgs),

    /// Discover projects and relocate them under an output directory
    Migrate(MigrateArgs),

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// Directory to crawl
    pub root: PathBuf,

    /// Manifest destination (default: ./manifest.json)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Replace an existing manifest
    #[arg(long)]
    pub overwrite: bool,

    /// Ask which instance is primary for every group with duplicates
    #[arg(long)]
    pub interactive: bool,

    #[arg(long)]
    pub date_strategy: Option<DateSource>,
}

#[derive(Args)]
pub struct MigrateArgs {
    /// Directory to crawl
    pub root: PathBuf,

    /// Destination root
    #[arg(long)]
    pub out: PathBuf,

    /// Copy instead of move; the share is left untouched
    #[arg(long)]
    pub copy: bool,

    /// Destination layout (default: dated, or asked for with --interactive)
    #[arg(long)]
    pub layout: Option<Layout>,

    /// Ask for primaries and layout
    #[arg(long)]
    pub interactive: bool,

    /// Allow a non-empty output directory and an existing manifest
    #[arg(long)]
    pub overwrite: bool,

    /// Manifest destination (default: <OUT>/manifest.json)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    #[arg(long)]
    pub date_strategy: Option<DateSource>,

    #[arg(long)]
    pub collisions: Option<Collisions>,

    /// Directory levels reported individually while transferring
    #[arg(long)]
    pub progress_depth: Option<usize>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the resolved config file path
    Path,
}
