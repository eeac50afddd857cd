use foundation::bounds::GeoBounds;
use foundation::geo::{GeoError, LatLng};

use crate::entity::{EntityId, GeoEntity};
use crate::filter::TagFilter;
use crate::plan::{ConnectorSpec, MarkerSpec, OverlayPlan, RingSpec, ViewerMarker, ViewportAction};
use crate::style::OverlayStyle;

/// Tuning for plan construction and viewport fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectorConfig {
    /// Padding on every viewport side, as a fraction of the fitted box's
    /// larger dimension.
    pub padding_fraction: f64,
    /// Smallest viewport dimension, so a single point still frames a
    /// visible area.
    pub min_extent_deg: f64,
    pub viewer_label: String,
    pub viewer_ring_radius_m: f64,
    pub style: OverlayStyle,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            padding_fraction: 0.2,
            min_extent_deg: 0.005,
            viewer_label: "You are here".to_string(),
            viewer_ring_radius_m: 500.0,
            style: OverlayStyle::default(),
        }
    }
}

/// A position outside the valid latitude/longitude ranges is a caller
/// contract violation; the projector surfaces it instead of clamping so an
/// upstream acquisition or feed bug cannot hide behind a plausible map.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectError {
    InvalidEntityPosition { id: EntityId, source: GeoError },
    InvalidViewerPosition { source: GeoError },
}

impl std::fmt::Display for ProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectError::InvalidEntityPosition { id, source } => {
                write!(f, "entity {}: {source}", id.0)
            }
            ProjectError::InvalidViewerPosition { source } => {
                write!(f, "viewer position: {source}")
            }
        }
    }
}

impl std::error::Error for ProjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectError::InvalidEntityPosition { source, .. } => Some(source),
            ProjectError::InvalidViewerPosition { source } => Some(source),
        }
    }
}

/// Project the current inputs into a full overlay plan.
///
/// The filter is stable: markers come out in snapshot order. Every entity in
/// the snapshot is validated, visible or not, so a bad coordinate surfaces
/// no matter which tags happen to be active.
pub fn project(
    entities: &[GeoEntity],
    filter: &TagFilter,
    viewer: Option<LatLng>,
    config: &ProjectorConfig,
) -> Result<OverlayPlan, ProjectError> {
    if let Some(position) = viewer {
        position
            .validate()
            .map_err(|source| ProjectError::InvalidViewerPosition { source })?;
    }

    let mut markers = Vec::new();
    for entity in entities {
        entity
            .position
            .validate()
            .map_err(|source| ProjectError::InvalidEntityPosition {
                id: entity.id,
                source,
            })?;
        if !filter.matches(entity) {
            continue;
        }
        markers.push(MarkerSpec {
            id: entity.id,
            position: entity.position,
            label: entity.label.clone(),
            avatar: entity.avatar.clone(),
            tags: entity.tags.iter().cloned().collect(),
        });
    }

    let (connectors, viewer_marker, ring) = match viewer {
        Some(position) => (
            markers
                .iter()
                .map(|m| ConnectorSpec {
                    from: position,
                    to: m.position,
                    to_id: m.id,
                })
                .collect(),
            Some(ViewerMarker {
                position,
                label: config.viewer_label.clone(),
            }),
            Some(RingSpec {
                center: position,
                radius_m: config.viewer_ring_radius_m,
            }),
        ),
        None => (Vec::new(), None, None),
    };

    let viewport = fit_viewport(markers.iter().map(|m| m.position).chain(viewer), config);

    Ok(OverlayPlan {
        markers,
        connectors,
        viewer: viewer_marker,
        ring,
        viewport,
        style: config.style,
    })
}

/// Fit a camera region around `points`; `Keep` when there is nothing to
/// frame.
pub fn fit_viewport(
    points: impl IntoIterator<Item = LatLng>,
    config: &ProjectorConfig,
) -> ViewportAction {
    let Some(bounds) = GeoBounds::from_points(points) else {
        return ViewportAction::Keep;
    };
    ViewportAction::Fit(
        bounds
            .with_min_extent(config.min_extent_deg)
            .padded(config.padding_fraction),
    )
}

#[cfg(test)]
mod tests {
    use super::{ProjectError, ProjectorConfig, project};
    use crate::entity::{EntityId, GeoEntity};
    use crate::filter::TagFilter;
    use crate::plan::ViewportAction;
    use foundation::geo::LatLng;

    fn sample_entities() -> Vec<GeoEntity> {
        vec![
            GeoEntity::new(1, LatLng::new(51.505, -0.09), "Miranda").with_tags(["Music"]),
            GeoEntity::new(2, LatLng::new(51.51, -0.1), "John").with_tags(["Sports"]),
        ]
    }

    #[test]
    fn filters_markers_without_viewer() {
        let plan = project(
            &sample_entities(),
            &TagFilter::with_active(["Music"]),
            None,
            &ProjectorConfig::default(),
        )
        .expect("valid input");

        assert_eq!(plan.markers.len(), 1);
        assert_eq!(plan.markers[0].id, EntityId(1));
        assert!(plan.connectors.is_empty());
        assert!(plan.viewer.is_none());
        assert!(plan.ring.is_none());
    }

    #[test]
    fn connectors_fan_out_from_viewer() {
        let viewer = LatLng::new(51.5, -0.095);
        let plan = project(
            &sample_entities(),
            &TagFilter::with_active(["Music"]),
            Some(viewer),
            &ProjectorConfig::default(),
        )
        .expect("valid input");

        assert_eq!(plan.connectors.len(), plan.markers.len());
        assert_eq!(plan.connectors[0].from, viewer);
        assert_eq!(plan.connectors[0].to, LatLng::new(51.505, -0.09));
        let marker = plan.viewer.expect("viewer marker");
        assert_eq!(marker.label, "You are here");
        assert_eq!(marker.position, viewer);
        assert_eq!(plan.ring.expect("ring").radius_m, 500.0);
    }

    #[test]
    fn markers_keep_snapshot_order() {
        let entities = vec![
            GeoEntity::new(9, LatLng::new(51.52, -0.11), "c").with_tags(["Music"]),
            GeoEntity::new(4, LatLng::new(51.50, -0.09), "a").with_tags(["Music"]),
            GeoEntity::new(7, LatLng::new(51.51, -0.10), "b").with_tags(["Music"]),
        ];
        let plan = project(
            &entities,
            &TagFilter::with_active(["Music"]),
            None,
            &ProjectorConfig::default(),
        )
        .expect("valid input");

        let ids: Vec<u64> = plan.markers.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![9, 4, 7]);
    }

    #[test]
    fn viewport_contains_all_rendered_points() {
        let viewer = LatLng::new(51.5, -0.095);
        let plan = project(
            &sample_entities(),
            &TagFilter::with_active(["Music", "Sports"]),
            Some(viewer),
            &ProjectorConfig::default(),
        )
        .expect("valid input");

        let bounds = plan.viewport.bounds().expect("fitted");
        for marker in &plan.markers {
            assert!(bounds.contains_strict(marker.position));
        }
        assert!(bounds.contains_strict(viewer));
    }

    #[test]
    fn single_point_viewport_is_not_degenerate() {
        let entities = vec![GeoEntity::new(1, LatLng::new(51.505, -0.09), "a").with_tags(["Music"])];
        let plan = project(
            &entities,
            &TagFilter::with_active(["Music"]),
            None,
            &ProjectorConfig::default(),
        )
        .expect("valid input");

        let bounds = plan.viewport.bounds().expect("fitted");
        assert!(bounds.width_deg() > 0.0);
        assert!(bounds.height_deg() > 0.0);
        assert!(bounds.contains_strict(LatLng::new(51.505, -0.09)));
    }

    #[test]
    fn empty_visible_set_keeps_viewport() {
        let plan = project(
            &sample_entities(),
            &TagFilter::empty(),
            None,
            &ProjectorConfig::default(),
        )
        .expect("valid input");

        assert!(plan.markers.is_empty());
        assert_eq!(plan.viewport, ViewportAction::Keep);
    }

    #[test]
    fn viewer_alone_still_fits_and_draws_ring() {
        let viewer = LatLng::new(51.5, -0.095);
        let plan = project(
            &sample_entities(),
            &TagFilter::empty(),
            Some(viewer),
            &ProjectorConfig::default(),
        )
        .expect("valid input");

        assert!(plan.markers.is_empty());
        assert!(plan.connectors.is_empty());
        let bounds = plan.viewport.bounds().expect("fitted around viewer");
        assert!(bounds.contains_strict(viewer));
        assert!(bounds.width_deg() > 0.0);
        assert!(plan.ring.is_some());
    }

    #[test]
    fn invalid_entity_position_fails_fast() {
        let entities =
            vec![GeoEntity::new(1, LatLng::new(91.0, 0.0), "broken").with_tags(["Music"])];
        let err = project(
            &entities,
            &TagFilter::with_active(["Music"]),
            None,
            &ProjectorConfig::default(),
        )
        .expect_err("out of range");
        assert!(matches!(
            err,
            ProjectError::InvalidEntityPosition {
                id: EntityId(1),
                ..
            }
        ));
    }

    #[test]
    fn hidden_entity_with_invalid_position_still_fails() {
        let entities =
            vec![GeoEntity::new(1, LatLng::new(0.0, 200.0), "broken").with_tags(["Travel"])];
        let err = project(
            &entities,
            &TagFilter::with_active(["Music"]),
            None,
            &ProjectorConfig::default(),
        )
        .expect_err("out of range");
        assert!(matches!(err, ProjectError::InvalidEntityPosition { .. }));
    }

    #[test]
    fn invalid_viewer_position_fails_fast() {
        let err = project(
            &sample_entities(),
            &TagFilter::with_active(["Music"]),
            Some(LatLng::new(0.0, -181.0)),
            &ProjectorConfig::default(),
        )
        .expect_err("out of range");
        assert!(matches!(err, ProjectError::InvalidViewerPosition { .. }));
    }
}
