use crate::index::ProjectIndex;
use crate::Result;
use consolidate_types::iso_midnight_utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One instance as recorded in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub path: String,
    /// ISO-8601 UTC, time always midnight
    pub date: String,
    pub primary: bool,
    #[serde(
        rename = "destinationPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_path: Option<String>,
}

/// Detached snapshot of a [`ProjectIndex`]: identity key -> records in group order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    groups: BTreeMap<String, Vec<ManifestRecord>>,
}

impl Manifest {
    /// Copy the index. With `include_destinations == false` (map-only runs)
    /// the `destinationPath` field is left out of every record.
    pub fn snapshot(index: &ProjectIndex, include_destinations: bool) -> Self {
        let groups = index
            .groups()
            .map(|group| {
                let records = group
                    .members()
                    .iter()
                    .map(|m| ManifestRecord {
                        path: m.source_path.to_string_lossy().to_string(),
                        date: iso_midnight_utc(m.representative_date),
                        primary: m.is_primary,
                        destination_path: if include_destinations {
                            m.destination_path
                                .as_ref()
                                .map(|p| p.to_string_lossy().to_string())
                        } else {
                            None
                        },
                    })
                    .collect();
                (group.key().to_string(), records)
            })
            .collect();

        Self { groups }
    }

    pub fn groups(&self) -> &BTreeMap<String, Vec<ManifestRecord>> {
        &self.groups
    }

    pub fn get(&self, key: &str) -> Option<&[ManifestRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Persists manifests as pretty-printed JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestWriter;

impl ManifestWriter {
    pub fn write(&self, manifest: &Manifest, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut json = manifest.to_json()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::AcceptDefaults;
    use crate::plan::DestinationPlanner;
    use crate::select::PrimarySelector;
    use chrono::NaiveDate;
    use consolidate_types::{CollisionPolicy, IdentityKey, LayoutMode, ProjectInstance};
    use serde_json::json;
    use tempfile::TempDir;

    fn index() -> ProjectIndex {
        let mut index = ProjectIndex::new();
        index.insert(ProjectInstance::new(
            "/A/old",
            IdentityKey::new("foo"),
            NaiveDate::from_ymd_opt(2019, 2, 3).unwrap(),
        ));
        index.insert(ProjectInstance::new(
            "/A/new",
            IdentityKey::new("foo"),
            NaiveDate::from_ymd_opt(2023, 8, 9).unwrap(),
        ));
        PrimarySelector::new(false)
            .select(&mut index, &mut AcceptDefaults)
            .unwrap();
        index
    }

    #[test]
    fn test_map_only_omits_destination_field() {
        let manifest = Manifest::snapshot(&index(), false);
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(
            value,
            json!({
                "foo": [
                    { "path": "/A/new", "date": "2023-08-09T00:00:00Z", "primary": true },
                    { "path": "/A/old", "date": "2019-02-03T00:00:00Z", "primary": false }
                ]
            })
        );
    }

    #[test]
    fn test_destinations_included_after_planning() {
        let mut index = index();
        DestinationPlanner::new("/Out", LayoutMode::Flat, CollisionPolicy::Suffix)
            .plan(&mut index)
            .unwrap();

        let manifest = Manifest::snapshot(&index, true);
        let records = manifest.get("foo").unwrap();
        assert_eq!(records[0].destination_path.as_deref(), Some("/Out/new"));
        assert_eq!(
            records[1].destination_path.as_deref(),
            Some("/Out/new/.versions/v1_old")
        );
    }

    #[test]
    fn test_snapshot_is_detached_from_index() {
        let mut index = index();
        let manifest = Manifest::snapshot(&index, false);
        for group in index.groups_mut() {
            group.mark_primary(1);
        }
        assert!(manifest.get("foo").unwrap()[0].primary);
    }

    #[test]
    fn test_write_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/manifest.json");
        let manifest = Manifest::snapshot(&index(), false);

        ManifestWriter.write(&manifest, &path).unwrap();
        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.len(), 1);
    }
}
