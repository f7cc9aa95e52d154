use crate::args::MigrateArgs;
use crate::context::ExecutionContext;
use anyhow::Result;
use consolidate_runtime::RunOptions;
use consolidate_types::TransferMode;

pub fn handle(ctx: &ExecutionContext, args: MigrateArgs) -> Result<()> {
    let config = ctx.config()?;
    let transfer = if args.copy {
        TransferMode::Copy
    } else {
        TransferMode::Move
    };
    let manifest = args
        .manifest
        .unwrap_or_else(|| args.out.join("manifest.json"));

    let mut options = RunOptions::migrate(args.root, args.out, transfer, manifest, config);
    options.overwrite = args.overwrite;
    options.interactive = args.interactive;
    options.excluded_paths.push(ctx.log_file().to_path_buf());
    if let Some(layout) = args.layout {
        options.layout = Some(layout.into());
    }
    if let Some(source) = args.date_strategy {
        options.date_strategy = source.into();
    }
    if let Some(collisions) = args.collisions {
        options.collisions = collisions.into();
    }
    if let Some(depth) = args.progress_depth {
        options.progress_depth = depth;
    }

    let report = super::execute(ctx, &options)?;
    if !report.failed.is_empty() {
        tracing::warn!(
            "{} projects were not fully transferred; see the run log",
            report.failed.len()
        );
    }
    Ok(())
}
