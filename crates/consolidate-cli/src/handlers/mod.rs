pub mod config;
pub mod migrate;
pub mod scan;

use crate::console::ConsoleDecisions;
use crate::context::ExecutionContext;
use crate::presentation::{TransferProgress, views};
use anyhow::Result;
use consolidate_engine::{AcceptDefaults, Logger};
use consolidate_runtime::{ConsolidationService, RunOptions, RunProgress, RunReport};
use is_terminal::IsTerminal;
use std::cell::RefCell;
use std::io;

/// Run with console collaborators. Fatal errors are logged and flushed
/// before they are returned.
fn execute(ctx: &ExecutionContext, options: &RunOptions) -> Result<RunReport> {
    let log = ctx.run_log()?;
    let color = io::stdout().is_terminal();
    let progress = RefCell::new(TransferProgress::new(io::stderr().is_terminal()));

    let mut sink = |activity: &str, item: &str, percent: u8| {
        progress.borrow_mut().update(activity, item, percent);
    };
    let on_event = |event: RunProgress| {
        progress.borrow_mut().clear();
        if let Some(line) = views::event_line(&event, color) {
            println!("{}", line);
        }
    };

    let service = ConsolidationService::new(options, log);
    let result = if options.interactive {
        let mut decisions = ConsoleDecisions::new(io::stdin().lock(), io::stdout());
        service.run(&mut decisions, &mut sink, on_event)
    } else {
        service.run(&mut AcceptDefaults, &mut sink, on_event)
    };

    match result {
        Ok(report) => {
            println!("{}", views::summary(&report, color));
            Ok(report)
        }
        Err(err) => {
            log.error(&format!("Run aborted: {}", err));
            if let Err(flush_err) = log.flush() {
                tracing::warn!("Failed to write run log: {}", flush_err);
            }
            Err(err.into())
        }
    }
}
