use std::collections::{BTreeMap, BTreeSet};

use overlay::entity::EntityId;
use overlay::plan::{MarkerSpec, OverlayPlan, ViewportAction};

/// Delta between two successive overlay plans, for render surfaces that
/// cannot diff declarative state themselves.
///
/// Markers are tracked per id. Connectors, the viewer marker, and the ring
/// are cheap enough to clear and redraw wholesale, which is also how the
/// product's map behaves on a location update.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDiff {
    /// Markers present in `next` but not in `prev`, in `next` order.
    pub added: Vec<MarkerSpec>,
    /// Ids present in `prev` but not in `next`, ascending.
    pub removed: Vec<EntityId>,
    /// Markers whose content changed, in `next` order.
    pub updated: Vec<MarkerSpec>,
    pub connectors_changed: bool,
    pub viewer_changed: bool,
    pub ring_changed: bool,
    pub style_changed: bool,
    pub viewport: ViewportAction,
}

impl PlanDiff {
    pub fn between(prev: &OverlayPlan, next: &OverlayPlan) -> Self {
        let prev_by_id: BTreeMap<EntityId, &MarkerSpec> =
            prev.markers.iter().map(|m| (m.id, m)).collect();
        let next_ids: BTreeSet<EntityId> = next.markers.iter().map(|m| m.id).collect();

        let mut added = Vec::new();
        let mut updated = Vec::new();
        for marker in &next.markers {
            match prev_by_id.get(&marker.id) {
                None => added.push(marker.clone()),
                Some(previous) if **previous != *marker => updated.push(marker.clone()),
                Some(_) => {}
            }
        }

        let removed = prev_by_id
            .keys()
            .copied()
            .filter(|id| !next_ids.contains(id))
            .collect();

        Self {
            added,
            removed,
            updated,
            connectors_changed: prev.connectors != next.connectors,
            viewer_changed: prev.viewer != next.viewer,
            ring_changed: prev.ring != next.ring,
            style_changed: prev.style != next.style,
            viewport: next.viewport,
        }
    }

    /// True when applying the diff would change nothing on the surface,
    /// camera included.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && !self.connectors_changed
            && !self.viewer_changed
            && !self.ring_changed
            && !self.style_changed
            && self.viewport == ViewportAction::Keep
    }
}
