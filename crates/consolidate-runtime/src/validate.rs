use crate::options::RunOptions;
use crate::{Error, Result};
use consolidate_engine::ProjectIndex;
use consolidate_types::normalize_path;
use std::path::Path;

/// Reject unusable paths before anything is read or written
pub fn validate(options: &RunOptions) -> Result<()> {
    if !options.root.is_dir() {
        return Err(Error::InvalidRoot(options.root.clone()));
    }

    if let Some(out) = options.out_dir() {
        let root = normalize_path(&options.root);
        let out_norm = normalize_path(out);
        if root.starts_with(&out_norm) {
            return Err(Error::InvalidOutput(format!(
                "{} contains the root {}",
                out.display(),
                options.root.display()
            )));
        }

        if out.exists() {
            if !out.is_dir() {
                return Err(Error::InvalidOutput(format!(
                    "{} is not a directory",
                    out.display()
                )));
            }
            if !options.overwrite && !is_empty_dir(out)? {
                return Err(Error::OutputExists(out.clone()));
            }
        }
    }

    let manifest = &options.manifest_path;
    if manifest.is_dir() {
        return Err(Error::InvalidOutput(format!(
            "manifest path {} is a directory",
            manifest.display()
        )));
    }
    if manifest.exists() && !options.overwrite {
        return Err(Error::OutputExists(manifest.clone()));
    }

    Ok(())
}

/// Checked after discovery: no project may contain the output directory
pub fn ensure_output_outside_projects(index: &ProjectIndex, out: &Path) -> Result<()> {
    let out_norm = normalize_path(out);
    match index
        .instances()
        .find(|instance| out_norm.starts_with(normalize_path(&instance.source_path)))
    {
        Some(instance) => Err(Error::OutputInsideProject {
            output: out.to_path_buf(),
            project: instance.source_path.clone(),
        }),
        None => Ok(()),
    }
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
    Ok(std::fs::read_dir(dir)?.next().is_none())
}
