use foundation::bounds::GeoBounds;
use foundation::geo::LatLng;

use crate::entity::{AvatarRef, EntityId};
use crate::style::OverlayStyle;

/// One entity marker to place on the map.
///
/// `tags` rides along for the marker popup (the entity's interest list).
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: EntityId,
    pub position: LatLng,
    pub label: String,
    pub avatar: AvatarRef,
    pub tags: Vec<String>,
}

/// The viewer's own marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerMarker {
    pub position: LatLng,
    pub label: String,
}

/// Line from the viewer to a visible entity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConnectorSpec {
    pub from: LatLng,
    pub to: LatLng,
    pub to_id: EntityId,
}

/// Radius circle around the viewer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RingSpec {
    pub center: LatLng,
    pub radius_m: f64,
}

/// Camera instruction for one render pass.
///
/// `Keep` means leave the camera where it is; it is the deterministic
/// fallback when there is nothing to frame, so a filter that momentarily
/// matches nobody does not fling the viewport to an arbitrary default.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportAction {
    Fit(GeoBounds),
    Keep,
}

impl ViewportAction {
    pub fn bounds(&self) -> Option<GeoBounds> {
        match self {
            ViewportAction::Fit(b) => Some(*b),
            ViewportAction::Keep => None,
        }
    }
}

/// Full desired overlay state for one render pass.
///
/// The plan is declarative: the render surface receives the whole state
/// every time and may diff against its previous frame if it wants to
/// animate (see the `surface` crate for a ready-made diff).
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPlan {
    /// Visible entities, in snapshot order.
    pub markers: Vec<MarkerSpec>,
    /// One connector per marker whenever the viewer is known.
    pub connectors: Vec<ConnectorSpec>,
    pub viewer: Option<ViewerMarker>,
    pub ring: Option<RingSpec>,
    pub viewport: ViewportAction,
    pub style: OverlayStyle,
}

impl OverlayPlan {
    /// A plan that draws nothing and leaves the camera alone.
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
            connectors: Vec::new(),
            viewer: None,
            ring: None,
            viewport: ViewportAction::Keep,
            style: OverlayStyle::default(),
        }
    }
}
