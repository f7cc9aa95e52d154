use crate::args::ScanArgs;
use crate::context::ExecutionContext;
use anyhow::Result;
use consolidate_runtime::RunOptions;
use std::path::PathBuf;

pub fn handle(ctx: &ExecutionContext, args: ScanArgs) -> Result<()> {
    let config = ctx.config()?;
    let manifest = args
        .manifest
        .unwrap_or_else(|| PathBuf::from("manifest.json"));

    let mut options = RunOptions::map_only(args.root, manifest, config);
    options.overwrite = args.overwrite;
    options.interactive = args.interactive;
    options.excluded_paths.push(ctx.log_file().to_path_buf());
    if let Some(source) = args.date_strategy {
        options.date_strategy = source.into();
    }

    super::execute(ctx, &options)?;
    Ok(())
}
