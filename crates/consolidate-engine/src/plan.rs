use crate::index::ProjectIndex;
use crate::{Error, Result};
use chrono::Datelike;
use consolidate_types::{CollisionPolicy, IdentityKey, LayoutMode, ProjectInstance, leaf_name};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory under a primary's destination that holds older versions
pub const VERSIONS_DIR: &str = ".versions";

/// Computes destination paths for every instance of every group
#[derive(Debug, Clone)]
pub struct DestinationPlanner {
    out_root: PathBuf,
    layout: LayoutMode,
    collisions: CollisionPolicy,
}

impl DestinationPlanner {
    pub fn new(
        out_root: impl Into<PathBuf>,
        layout: LayoutMode,
        collisions: CollisionPolicy,
    ) -> Self {
        Self {
            out_root: out_root.into(),
            layout,
            collisions,
        }
    }

    /// Fill `destination_path` for all instances.
    ///
    /// Requires primaries to be selected. Groups claim destinations in index
    /// order, so the same index always produces the same plan. Destinations
    /// that differ only in letter case collide.
    pub fn plan(&self, index: &mut ProjectIndex) -> Result<()> {
        index.verify_primaries()?;

        let mut claimed: HashMap<PathBuf, IdentityKey> = HashMap::new();

        for group in index.groups_mut() {
            let key = group.key().clone();
            let Some(primary) = group.primary() else {
                continue;
            };

            let wanted = self.primary_destination(primary);
            let destination = match claimed.get(&claim_key(&wanted)) {
                None => wanted,
                Some(owner) => match self.collisions {
                    CollisionPolicy::Reject => {
                        return Err(Error::DestinationCollision {
                            destination: wanted,
                            claimed_by: owner.to_string(),
                            rejected: key.to_string(),
                        });
                    }
                    CollisionPolicy::Suffix => {
                        let mut n = 2;
                        let mut candidate = with_suffix(&wanted, n);
                        while claimed.contains_key(&claim_key(&candidate)) {
                            n += 1;
                            candidate = with_suffix(&wanted, n);
                        }
                        candidate
                    }
                },
            };
            claimed.insert(claim_key(&destination), key);

            let mut version = 0;
            for member in group.members_mut() {
                if member.is_primary {
                    member.destination_path = Some(destination.clone());
                } else {
                    version += 1;
                    member.destination_path =
                        Some(version_destination(&destination, version, member));
                }
            }
        }

        Ok(())
    }

    /// `Out/<year>/<leaf>` or `Out/<leaf>`, before collision handling
    pub fn primary_destination(&self, primary: &ProjectInstance) -> PathBuf {
        match self.layout {
            LayoutMode::Dated => self
                .out_root
                .join(primary.representative_date.year().to_string())
                .join(primary.leaf_name()),
            LayoutMode::Flat => self.out_root.join(primary.leaf_name()),
        }
    }
}

/// `<primary destination>/.versions/v<N>_<leaf>`
pub fn version_destination(
    primary_destination: &Path,
    version: usize,
    secondary: &ProjectInstance,
) -> PathBuf {
    primary_destination
        .join(VERSIONS_DIR)
        .join(format!("v{}_{}", version, secondary.leaf_name()))
}

/// Case-folded form used to detect clashes on case-insensitive filesystems
fn claim_key(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().to_lowercase())
}

fn with_suffix(path: &Path, n: usize) -> PathBuf {
    let leaf = leaf_name(path);
    path.with_file_name(format!("{}-{}", leaf, n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::AcceptDefaults;
    use crate::select::PrimarySelector;
    use chrono::NaiveDate;

    fn selected_index(entries: &[(&str, &str, i32)]) -> ProjectIndex {
        let mut index = ProjectIndex::new();
        for (path, key, year) in entries {
            index.insert(ProjectInstance::new(
                *path,
                IdentityKey::new(*key),
                NaiveDate::from_ymd_opt(*year, 6, 1).unwrap(),
            ));
        }
        PrimarySelector::new(false)
            .select(&mut index, &mut AcceptDefaults)
            .unwrap();
        index
    }

    fn destinations(index: &ProjectIndex) -> Vec<(String, String)> {
        index
            .instances()
            .map(|i| {
                (
                    i.source_path.to_string_lossy().to_string(),
                    i.destination_path
                        .as_ref()
                        .unwrap()
                        .to_string_lossy()
                        .replace('\\', "/"),
                )
            })
            .collect()
    }

    #[test]
    fn test_dated_layout_with_versions() {
        let mut index = selected_index(&[
            ("/A/old", "foo", 2019),
            ("/A/new", "foo", 2023),
            ("/C/older", "foo", 2017),
        ]);
        DestinationPlanner::new("/Out", LayoutMode::Dated, CollisionPolicy::Suffix)
            .plan(&mut index)
            .unwrap();

        assert_eq!(
            destinations(&index),
            vec![
                ("/A/new".to_string(), "/Out/2023/new".to_string()),
                ("/A/old".to_string(), "/Out/2023/new/.versions/v1_old".to_string()),
                ("/C/older".to_string(), "/Out/2023/new/.versions/v2_older".to_string()),
            ]
        );
    }

    #[test]
    fn test_flat_layout_only_changes_prefix() {
        let entries = [("/A/old", "foo", 2019), ("/A/new", "foo", 2023)];
        let mut flat = selected_index(&entries);
        DestinationPlanner::new("/Out", LayoutMode::Flat, CollisionPolicy::Suffix)
            .plan(&mut flat)
            .unwrap();

        assert_eq!(
            destinations(&flat),
            vec![
                ("/A/new".to_string(), "/Out/new".to_string()),
                ("/A/old".to_string(), "/Out/new/.versions/v1_old".to_string()),
            ]
        );
    }

    #[test]
    fn test_collision_suffix() {
        let mut index = selected_index(&[("/x/app", "alpha", 2020), ("/y/app", "beta", 2020)]);
        DestinationPlanner::new("/Out", LayoutMode::Flat, CollisionPolicy::Suffix)
            .plan(&mut index)
            .unwrap();

        assert_eq!(
            destinations(&index),
            vec![
                ("/x/app".to_string(), "/Out/app".to_string()),
                ("/y/app".to_string(), "/Out/app-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_collision_ignores_letter_case() {
        let mut index = selected_index(&[("/x/App", "alpha", 2020), ("/y/app", "beta", 2020)]);
        DestinationPlanner::new("/Out", LayoutMode::Flat, CollisionPolicy::Suffix)
            .plan(&mut index)
            .unwrap();

        assert_eq!(
            destinations(&index),
            vec![
                ("/x/App".to_string(), "/Out/App".to_string()),
                ("/y/app".to_string(), "/Out/app-2".to_string()),
            ]
        );

        let mut index = selected_index(&[("/x/App", "alpha", 2020), ("/y/app", "beta", 2020)]);
        let err = DestinationPlanner::new("/Out", LayoutMode::Flat, CollisionPolicy::Reject)
            .plan(&mut index)
            .unwrap_err();
        assert!(matches!(err, Error::DestinationCollision { .. }));
    }

    #[test]
    fn test_collision_reject() {
        let mut index = selected_index(&[("/x/app", "alpha", 2020), ("/y/app", "beta", 2020)]);
        let err = DestinationPlanner::new("/Out", LayoutMode::Flat, CollisionPolicy::Reject)
            .plan(&mut index)
            .unwrap_err();
        assert!(matches!(err, Error::DestinationCollision { .. }));
    }

    #[test]
    fn test_different_years_do_not_collide() {
        let mut index = selected_index(&[("/x/app", "alpha", 2020), ("/y/app", "beta", 2021)]);
        DestinationPlanner::new("/Out", LayoutMode::Dated, CollisionPolicy::Reject)
            .plan(&mut index)
            .unwrap();
    }

    #[test]
    fn test_plan_requires_primaries() {
        let mut index = ProjectIndex::new();
        index.insert(ProjectInstance::new(
            "/a",
            IdentityKey::new("k"),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        ));
        let err = DestinationPlanner::new("/Out", LayoutMode::Flat, CollisionPolicy::Suffix)
            .plan(&mut index)
            .unwrap_err();
        assert!(matches!(err, Error::PrimaryInvariant { .. }));
    }
}
