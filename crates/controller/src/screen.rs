use foundation::bounds::GeoBounds;
use foundation::geo::LatLng;
use location::provider::{AcquireError, LocationProvider};
use location::tracker::{AcquisitionId, PositionTracker, Resolution};
use overlay::filter::TagFilter;
use overlay::plan::{OverlayPlan, ViewportAction};
use overlay::projector::{ProjectError, ProjectorConfig, project};
use overlay::store::EntityStore;
use surface::RenderSurface;

use crate::notice::{Notice, NoticeBus, Severity};

/// Screen-level controller for the around-me overlay.
///
/// Owns the inputs the projector derives from (entity snapshot, tag
/// filter, viewer tracker) and exposes the mutation entry points the host
/// UI calls. Each mutation bumps the revision; the host recomputes and
/// resubmits by calling [`OverlayController::render`] afterwards.
#[derive(Debug)]
pub struct OverlayController {
    config: ProjectorConfig,
    store: EntityStore,
    filter: TagFilter,
    tracker: PositionTracker,
    notices: NoticeBus,
    last_fit: Option<GeoBounds>,
    revision: u64,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(ProjectorConfig::default())
    }
}

impl OverlayController {
    pub fn new(config: ProjectorConfig) -> Self {
        Self {
            config,
            store: EntityStore::new(),
            filter: TagFilter::default(),
            tracker: PositionTracker::new(),
            notices: NoticeBus::new(),
            last_fit: None,
            revision: 0,
        }
    }

    pub fn with_filter(config: ProjectorConfig, filter: TagFilter) -> Self {
        Self {
            filter,
            ..Self::new(config)
        }
    }

    /// Replace the entity snapshot.
    pub fn set_entities(&mut self, store: EntityStore) {
        self.store = store;
        self.revision += 1;
    }

    /// Toggle one interest tag on the active filter.
    pub fn toggle_tag(&mut self, tag: &str) {
        self.filter.toggle(tag);
        self.revision += 1;
    }

    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    pub fn is_locating(&self) -> bool {
        self.tracker.is_acquiring()
    }

    /// Start an acquisition attempt; the host resolves it later with
    /// [`OverlayController::apply_fix`].
    pub fn begin_locate(&mut self) -> AcquisitionId {
        self.revision += 1;
        self.tracker.begin()
    }

    /// Apply an acquisition outcome.
    ///
    /// Stale responses are dropped silently. Failures and rejected fixes
    /// raise a warning notice and keep the last known position on the map.
    pub fn apply_fix(
        &mut self,
        id: AcquisitionId,
        outcome: Result<LatLng, AcquireError>,
    ) -> Resolution {
        let resolution = self.tracker.resolve(id, outcome);
        match &resolution {
            Resolution::Applied(_) => {
                self.revision += 1;
            }
            Resolution::Failed(err) => {
                self.revision += 1;
                let message = failure_message(err);
                self.notices.raise(self.revision, Severity::Warning, message);
            }
            Resolution::Rejected(err) => {
                self.revision += 1;
                self.notices.raise(
                    self.revision,
                    Severity::Warning,
                    format!("Location unavailable: {err}"),
                );
            }
            Resolution::Stale => {}
        }
        resolution
    }

    /// Run one blocking acquisition against `provider`.
    pub fn locate_with(&mut self, provider: &mut dyn LocationProvider) -> Resolution {
        let id = self.begin_locate();
        let outcome = provider.request_position();
        self.apply_fix(id, outcome)
    }

    /// Compute the overlay plan for the current inputs.
    pub fn plan(&self) -> Result<OverlayPlan, ProjectError> {
        project(
            self.store.entities(),
            &self.filter,
            self.tracker.position(),
            &self.config,
        )
    }

    /// Compute the current plan and submit it to `surface`.
    pub fn render(&mut self, surface: &mut dyn RenderSurface) -> Result<(), ProjectError> {
        let plan = self.plan()?;
        if let ViewportAction::Fit(bounds) = plan.viewport {
            self.last_fit = Some(bounds);
        }
        surface.apply(&plan);
        Ok(())
    }

    /// Bounds of the most recent `Fit` actually submitted; the camera
    /// position a `Keep` leaves in place.
    pub fn last_fit(&self) -> Option<GeoBounds> {
        self.last_fit
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.notices()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn failure_message(err: &AcquireError) -> String {
    match err {
        AcquireError::PermissionDenied => {
            "Location permission denied. Allow location access in settings to see people near you."
                .to_string()
        }
        AcquireError::Timeout => {
            "Could not get a location fix in time. Make sure GPS is on.".to_string()
        }
        AcquireError::Acquisition(msg) => format!("Could not determine your location: {msg}"),
    }
}
