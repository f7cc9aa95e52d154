use crate::{Error, Result};
use consolidate_types::{IdentityGroup, IdentityKey, ProjectInstance};
use std::collections::BTreeMap;

/// Identity key -> group of discovered instances, owned by a single run.
///
/// Keys iterate in lexicographic order so every downstream stage
/// (selection prompts, collision suffixes, the manifest) is reproducible.
#[derive(Debug, Default, Clone)]
pub struct ProjectIndex {
    groups: BTreeMap<IdentityKey, IdentityGroup>,
}

impl ProjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instance: ProjectInstance) {
        match self.groups.get_mut(&instance.identity_key) {
            Some(group) => group.push(instance),
            None => {
                self.groups
                    .insert(instance.identity_key.clone(), IdentityGroup::new(instance));
            }
        }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&IdentityGroup> {
        self.groups.get(key)
    }

    pub fn groups(&self) -> impl Iterator<Item = &IdentityGroup> {
        self.groups.values()
    }

    pub fn groups_mut(&mut self) -> impl Iterator<Item = &mut IdentityGroup> {
        self.groups.values_mut()
    }

    pub fn instances(&self) -> impl Iterator<Item = &ProjectInstance> {
        self.groups.values().flat_map(|g| g.members().iter())
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn project_count(&self) -> usize {
        self.groups.values().map(IdentityGroup::len).sum()
    }

    /// Groups with more than one instance
    pub fn duplicate_group_count(&self) -> usize {
        self.groups.values().filter(|g| g.len() > 1).count()
    }

    pub fn sort_groups(&mut self) {
        for group in self.groups.values_mut() {
            group.sort_by_recency();
        }
    }

    /// Every group must carry exactly one primary before planning
    pub fn verify_primaries(&self) -> Result<()> {
        for group in self.groups.values() {
            let primaries = group.primary_count();
            if primaries != 1 {
                return Err(Error::PrimaryInvariant {
                    key: group.key().to_string(),
                    primaries,
                });
            }
        }
        Ok(())
    }
}
