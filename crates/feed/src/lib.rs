//! Wire types for the nearby-user feed.
//!
//! The feed delivers snapshots of nearby users as JSON arrays:
//!
//! ```json
//! [{"id": 1, "name": "Miranda", "lat": 51.505, "lng": -0.09,
//!   "avatar": "https://...", "interests": ["Music", "Travel"]}]
//! ```
//!
//! Decoding validates the boundary contract (coordinate ranges and id
//! uniqueness), so a bad record fails here with a useful id instead of
//! deep inside plan construction. Transport, authentication, and response
//! envelope handling belong to the host, not this crate.

use std::collections::BTreeSet;

use foundation::geo::{GeoError, LatLng};
use overlay::entity::{AvatarRef, EntityId, GeoEntity};
use overlay::store::{EntityStore, SnapshotError};
use serde::{Deserialize, Serialize};

/// One nearby user as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyUserRecord {
    pub id: u64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    Json(String),
    InvalidCoordinate { id: u64, source: GeoError },
    DuplicateId(u64),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Json(msg) => write!(f, "malformed feed snapshot: {msg}"),
            FeedError::InvalidCoordinate { id, source } => {
                write!(f, "nearby user {id}: {source}")
            }
            FeedError::DuplicateId(id) => write!(f, "duplicate nearby user id {id}"),
        }
    }
}

impl std::error::Error for FeedError {}

impl NearbyUserRecord {
    pub fn into_entity(self) -> Result<GeoEntity, FeedError> {
        let position = LatLng::new(self.lat, self.lng);
        position
            .validate()
            .map_err(|source| FeedError::InvalidCoordinate {
                id: self.id,
                source,
            })?;
        Ok(GeoEntity {
            id: EntityId(self.id),
            position,
            label: self.name,
            avatar: AvatarRef(self.avatar),
            tags: self.interests.into_iter().collect::<BTreeSet<_>>(),
        })
    }
}

/// Decode a JSON snapshot into an id-keyed entity store.
pub fn decode_snapshot(json: &str) -> Result<EntityStore, FeedError> {
    let records: Vec<NearbyUserRecord> =
        serde_json::from_str(json).map_err(|e| FeedError::Json(e.to_string()))?;
    store_from_records(records)
}

pub fn store_from_records(records: Vec<NearbyUserRecord>) -> Result<EntityStore, FeedError> {
    let mut entities = Vec::with_capacity(records.len());
    for record in records {
        entities.push(record.into_entity()?);
    }
    EntityStore::from_entities(entities).map_err(|e| match e {
        SnapshotError::DuplicateId(id) => FeedError::DuplicateId(id.0),
    })
}
