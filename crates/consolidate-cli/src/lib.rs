// consolidate: find every project folder below a share, group copies of the
// same project, pick the newest as primary and move (or copy) each group into
// one place, primary on top and older copies under `.versions/`.
//
// Every run writes a JSON manifest of what was found and where it went, and
// appends to a plain-text run log. `scan` only maps; `migrate` relocates.

mod args;
mod commands;
pub mod console;
mod context;
mod handlers;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand, MigrateArgs, ScanArgs};
pub use commands::run;
