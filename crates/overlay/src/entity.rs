use std::collections::BTreeSet;

use foundation::geo::LatLng;

/// Stable identifier for a nearby entity within one snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// Opaque reference to a visual asset (an avatar URL in practice).
///
/// The engine never interprets it; it is handed through to the render
/// surface verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AvatarRef(pub String);

/// A nearby user placed on the map.
///
/// Positions are immutable for the lifetime of a snapshot; a moving entity
/// shows up as a new snapshot, never as a mid-computation mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoEntity {
    pub id: EntityId,
    pub position: LatLng,
    pub label: String,
    pub avatar: AvatarRef,
    pub tags: BTreeSet<String>,
}

impl GeoEntity {
    pub fn new(id: u64, position: LatLng, label: impl Into<String>) -> Self {
        Self {
            id: EntityId(id),
            position,
            label: label.into(),
            avatar: AvatarRef::default(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = AvatarRef(avatar.into());
        self
    }
}
