use crate::context::ExecutionContext;
use anyhow::Result;

pub fn show(ctx: &ExecutionContext) -> Result<()> {
    print!("{}", ctx.config()?.to_toml()?);
    Ok(())
}

pub fn path(ctx: &ExecutionContext) -> Result<()> {
    println!("{}", ctx.config_path().display());
    Ok(())
}
