//! Checks over manifest JSON (`{ key: [ { path, date, primary, destinationPath? } ] }`).

use anyhow::{Context, Result};
use serde_json::Value;

fn groups(manifest: &Value) -> Result<&serde_json::Map<String, Value>> {
    manifest
        .as_object()
        .context("Expected manifest to be a JSON object")
}

pub fn assert_group_count(manifest: &Value, expected: usize) -> Result<()> {
    let count = groups(manifest)?.len();
    if count != expected {
        anyhow::bail!("Expected {} groups, got {}", expected, count);
    }
    Ok(())
}

/// Every group has exactly one record with `primary: true`
pub fn assert_one_primary_per_group(manifest: &Value) -> Result<()> {
    for (key, records) in groups(manifest)? {
        let records = records
            .as_array()
            .with_context(|| format!("Group {} is not an array", key))?;
        let primaries = records
            .iter()
            .filter(|r| r["primary"].as_bool() == Some(true))
            .count();
        if primaries != 1 {
            anyhow::bail!("Group {} has {} primaries", key, primaries);
        }
    }
    Ok(())
}

/// No record carries `destinationPath` (map-only manifests)
pub fn assert_no_destinations(manifest: &Value) -> Result<()> {
    for (key, records) in groups(manifest)? {
        for record in records.as_array().into_iter().flatten() {
            if record.get("destinationPath").is_some() {
                anyhow::bail!("Group {} has a destinationPath: {}", key, record);
            }
        }
    }
    Ok(())
}

pub fn primary_record<'a>(manifest: &'a Value, key: &str) -> Result<&'a Value> {
    manifest[key]
        .as_array()
        .with_context(|| format!("No group {}", key))?
        .iter()
        .find(|r| r["primary"].as_bool() == Some(true))
        .with_context(|| format!("Group {} has no primary", key))
}
