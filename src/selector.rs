use crate::{foundation::core::Progress, model::story::Story};

/// Emitted when the active section's id changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionChange {
    pub from: usize,
    pub to: usize,
}

/// Tracks the active story section across progress updates.
///
/// Starts on the first section, matching a page loaded at the top.
#[derive(Clone, Copy, Debug, Default)]
pub struct SectionSelector {
    active: usize,
}

impl SectionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Reselect for `p`; returns a change only when the selected id differs.
    pub fn update(&mut self, story: &Story, p: Progress) -> Option<SectionChange> {
        let next = story.select_index(p);
        let same_id = match (story.get(self.active), story.get(next)) {
            (Some(a), Some(b)) => a.id == b.id,
            _ => false,
        };
        if same_id {
            return None;
        }
        let change = SectionChange {
            from: self.active,
            to: next,
        };
        self.active = next;
        tracing::debug!(
            from = change.from,
            to = change.to,
            progress = p.get(),
            "active section changed"
        );
        Some(change)
    }
}
