use std::collections::BTreeSet;

use crate::entity::GeoEntity;

/// Pure toggle: a new set with `tag` removed if present, inserted otherwise.
pub fn toggled(active: &BTreeSet<String>, tag: &str) -> BTreeSet<String> {
    let mut out = active.clone();
    if !out.remove(tag) {
        out.insert(tag.to_string());
    }
    out
}

/// The set of interest tags currently selected as filters.
///
/// An entity is visible iff it shares at least one tag with the active set.
/// An empty active set matches nothing: toggling off the last tag empties
/// the map rather than showing everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    active: BTreeSet<String>,
}

impl Default for TagFilter {
    fn default() -> Self {
        // The discover screen starts with "Music" selected.
        Self::with_active(["Music"])
    }
}

impl TagFilter {
    pub fn empty() -> Self {
        Self {
            active: BTreeSet::new(),
        }
    }

    pub fn with_active<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn active(&self) -> &BTreeSet<String> {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.active.contains(tag)
    }

    /// True iff `tags` intersects the active set non-emptily.
    pub fn matches_tags(&self, tags: &BTreeSet<String>) -> bool {
        tags.iter().any(|t| self.active.contains(t))
    }

    pub fn matches(&self, entity: &GeoEntity) -> bool {
        self.matches_tags(&entity.tags)
    }

    pub fn toggle(&mut self, tag: &str) {
        self.active = toggled(&self.active, tag);
    }
}
