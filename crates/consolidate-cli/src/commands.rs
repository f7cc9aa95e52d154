use super::args::{Cli, Commands, ConfigCommand};
use super::context::ExecutionContext;
use super::handlers;
use crate::types::LogLevel;
use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_level);

    let ctx = ExecutionContext::new(cli.config.as_deref(), cli.log_file.clone())?;

    match cli.command {
        Commands::Scan(args) => handlers::scan::handle(&ctx, args),
        Commands::Migrate(args) => handlers::migrate::handle(&ctx, args),
        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&ctx),
            ConfigCommand::Path => handlers::config::path(&ctx),
        },
    }
}

/// Console diagnostics go to stderr so stdout stays readable.
/// `CONSOLIDATE_LOG` overrides `--log-level` with a full filter directive.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_env("CONSOLIDATE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
