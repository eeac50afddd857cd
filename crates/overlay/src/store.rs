use std::collections::BTreeMap;

use crate::entity::{EntityId, GeoEntity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    DuplicateId(EntityId),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::DuplicateId(id) => write!(f, "duplicate entity id {}", id.0),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Id-keyed snapshot of nearby entities.
///
/// Iteration preserves the order entities arrived in, so downstream plans
/// stay stable across recomputes. A snapshot is built once and replaced
/// whole; it is never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    entities: Vec<GeoEntity>,
    index: BTreeMap<EntityId, usize>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot, rejecting duplicate ids.
    pub fn from_entities(entities: Vec<GeoEntity>) -> Result<Self, SnapshotError> {
        let mut index = BTreeMap::new();
        for (i, entity) in entities.iter().enumerate() {
            if index.insert(entity.id, i).is_some() {
                return Err(SnapshotError::DuplicateId(entity.id));
            }
        }
        Ok(Self { entities, index })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&GeoEntity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    pub fn entities(&self) -> &[GeoEntity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoEntity> {
        self.entities.iter()
    }
}
