use super::project::{IdentityKey, ProjectInstance};

/// All discovered instances sharing one identity key.
///
/// After [`IdentityGroup::sort_by_recency`] members are ordered newest first,
/// ties broken by source path so the order never depends on crawl order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityGroup {
    key: IdentityKey,
    members: Vec<ProjectInstance>,
}

impl IdentityGroup {
    pub fn new(first: ProjectInstance) -> Self {
        Self {
            key: first.identity_key.clone(),
            members: vec![first],
        }
    }

    pub fn key(&self) -> &IdentityKey {
        &self.key
    }

    pub fn members(&self) -> &[ProjectInstance] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [ProjectInstance] {
        &mut self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn push(&mut self, instance: ProjectInstance) {
        debug_assert_eq!(instance.identity_key, self.key);
        self.members.push(instance);
    }

    pub fn sort_by_recency(&mut self) {
        self.members.sort_by(|a, b| {
            b.representative_date
                .cmp(&a.representative_date)
                .then_with(|| a.source_path.cmp(&b.source_path))
        });
    }

    /// Mark exactly one member as primary, clearing any previous mark.
    ///
    /// Returns false (leaving the group untouched) when `index` is out of range.
    pub fn mark_primary(&mut self, index: usize) -> bool {
        if index >= self.members.len() {
            return false;
        }
        for (i, member) in self.members.iter_mut().enumerate() {
            member.is_primary = i == index;
        }
        true
    }

    pub fn primary_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_primary).count()
    }

    pub fn primary_index(&self) -> Option<usize> {
        self.members.iter().position(|m| m.is_primary)
    }

    pub fn primary(&self) -> Option<&ProjectInstance> {
        self.members.iter().find(|m| m.is_primary)
    }

    /// Non-primary members in group order
    pub fn secondaries(&self) -> impl Iterator<Item = &ProjectInstance> {
        self.members.iter().filter(|m| !m.is_primary)
    }
}
