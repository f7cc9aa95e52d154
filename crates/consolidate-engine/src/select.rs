use crate::decision::DecisionProvider;
use crate::index::ProjectIndex;
use crate::{Error, Result};
use consolidate_types::IdentityGroup;

/// Marks one primary per group: the newest instance, or the operator's pick
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimarySelector {
    interactive: bool,
}

impl PrimarySelector {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    pub fn select(
        &self,
        index: &mut ProjectIndex,
        decisions: &mut dyn DecisionProvider,
    ) -> Result<()> {
        index.sort_groups();

        for group in index.groups_mut() {
            let choice = if self.interactive && group.len() > 1 {
                let options = describe_members(group);
                let prompt = format!(
                    "{} copies of '{}' found; choose the current version",
                    group.len(),
                    group.key()
                );
                let choice = decisions.ask_choice(&prompt, &options, 0)?;
                if choice >= group.len() {
                    return Err(Error::InvalidChoice {
                        key: group.key().to_string(),
                        choice,
                        options: group.len(),
                    });
                }
                choice
            } else {
                0
            };

            group.mark_primary(choice);
        }

        index.verify_primaries()
    }
}

fn describe_members(group: &IdentityGroup) -> Vec<String> {
    group
        .members()
        .iter()
        .map(|m| {
            format!(
                "{}  ({})",
                m.source_path.display(),
                m.representative_date
            )
        })
        .collect()
}
