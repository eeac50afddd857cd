use foundation::geo::{GeoError, LatLng};

use crate::provider::AcquireError;

/// Identifies one acquisition attempt.
///
/// Ids are monotonically increasing per tracker, so a response can always be
/// matched against the most recently issued attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AcquisitionId(pub u64);

/// Observable lifecycle of the viewer position.
///
/// `Unknown → Acquiring → Known | Failed`, with `Acquiring` reachable again
/// from any resolved state (manual re-locate). Never terminal.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TrackerPhase {
    #[default]
    Unknown,
    Acquiring,
    Known,
    Failed,
}

/// Outcome of applying an acquisition response.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The fix was applied; the tracker is `Known` at this position.
    Applied(LatLng),
    /// The attempt failed; any previously known position is retained.
    Failed(AcquireError),
    /// The fix carried an out-of-range coordinate and was not applied.
    Rejected(GeoError),
    /// The response belongs to a superseded attempt and was dropped.
    Stale,
}

/// Tracks the viewer's device position across acquisition attempts.
///
/// The last successfully acquired position survives failed refreshes and
/// re-acquisition, so the map never flickers back to "unknown" while a new
/// fix is in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTracker {
    next_id: u64,
    pending: Option<AcquisitionId>,
    phase: TrackerPhase,
    last_known: Option<LatLng>,
    last_error: Option<AcquireError>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new acquisition attempt, superseding any attempt still in
    /// flight. Last-started wins: only the id returned here may resolve.
    pub fn begin(&mut self) -> AcquisitionId {
        self.next_id += 1;
        let id = AcquisitionId(self.next_id);
        self.pending = Some(id);
        self.phase = TrackerPhase::Acquiring;
        id
    }

    /// Apply the response for attempt `id`.
    ///
    /// Responses for anything but the most recently issued attempt are
    /// dropped as `Stale` with no state change.
    pub fn resolve(
        &mut self,
        id: AcquisitionId,
        outcome: Result<LatLng, AcquireError>,
    ) -> Resolution {
        if self.pending != Some(id) {
            return Resolution::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(position) => match position.validate() {
                Ok(()) => {
                    self.phase = TrackerPhase::Known;
                    self.last_known = Some(position);
                    self.last_error = None;
                    Resolution::Applied(position)
                }
                Err(err) => {
                    self.phase = TrackerPhase::Failed;
                    self.last_error = Some(AcquireError::Acquisition(err.to_string()));
                    Resolution::Rejected(err)
                }
            },
            Err(err) => {
                self.phase = TrackerPhase::Failed;
                self.last_error = Some(err.clone());
                Resolution::Failed(err)
            }
        }
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn is_acquiring(&self) -> bool {
        self.pending.is_some()
    }

    /// Last successfully acquired position, regardless of later failures.
    pub fn position(&self) -> Option<LatLng> {
        self.last_known
    }

    pub fn last_error(&self) -> Option<&AcquireError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::{PositionTracker, Resolution, TrackerPhase};
    use crate::provider::AcquireError;
    use foundation::geo::LatLng;

    #[test]
    fn starts_unknown() {
        let tracker = PositionTracker::new();
        assert_eq!(tracker.phase(), TrackerPhase::Unknown);
        assert!(tracker.position().is_none());
        assert!(!tracker.is_acquiring());
    }

    #[test]
    fn successful_acquisition_becomes_known() {
        let mut tracker = PositionTracker::new();
        let id = tracker.begin();
        assert_eq!(tracker.phase(), TrackerPhase::Acquiring);

        let fix = LatLng::new(51.5, -0.095);
        assert_eq!(tracker.resolve(id, Ok(fix)), Resolution::Applied(fix));
        assert_eq!(tracker.phase(), TrackerPhase::Known);
        assert_eq!(tracker.position(), Some(fix));
    }

    #[test]
    fn failure_retains_last_known_position() {
        let mut tracker = PositionTracker::new();
        let fix = LatLng::new(51.5, -0.095);
        let id = tracker.begin();
        tracker.resolve(id, Ok(fix));

        let retry = tracker.begin();
        let outcome = tracker.resolve(retry, Err(AcquireError::PermissionDenied));
        assert_eq!(outcome, Resolution::Failed(AcquireError::PermissionDenied));
        assert_eq!(tracker.phase(), TrackerPhase::Failed);
        assert_eq!(tracker.position(), Some(fix));
        assert_eq!(tracker.last_error(), Some(&AcquireError::PermissionDenied));
    }

    #[test]
    fn relocate_keeps_previous_position_while_acquiring() {
        let mut tracker = PositionTracker::new();
        let fix = LatLng::new(51.5, -0.095);
        let id = tracker.begin();
        tracker.resolve(id, Ok(fix));

        tracker.begin();
        assert_eq!(tracker.phase(), TrackerPhase::Acquiring);
        assert_eq!(tracker.position(), Some(fix));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut tracker = PositionTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        let newer = LatLng::new(51.51, -0.1);
        assert_eq!(tracker.resolve(second, Ok(newer)), Resolution::Applied(newer));

        // The older attempt resolves late; its fix must not win.
        let older = LatLng::new(40.0, -74.0);
        assert_eq!(tracker.resolve(first, Ok(older)), Resolution::Stale);
        assert_eq!(tracker.position(), Some(newer));
        assert_eq!(tracker.phase(), TrackerPhase::Known);
    }

    #[test]
    fn stale_failure_does_not_disturb_known_state() {
        let mut tracker = PositionTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        let fix = LatLng::new(51.5, -0.095);
        tracker.resolve(second, Ok(fix));
        assert_eq!(
            tracker.resolve(first, Err(AcquireError::Timeout)),
            Resolution::Stale
        );
        assert_eq!(tracker.phase(), TrackerPhase::Known);
        assert!(tracker.last_error().is_none());
    }

    #[test]
    fn out_of_range_fix_is_rejected() {
        let mut tracker = PositionTracker::new();
        let id = tracker.begin();
        let outcome = tracker.resolve(id, Ok(LatLng::new(91.0, 0.0)));
        assert!(matches!(outcome, Resolution::Rejected(_)));
        assert_eq!(tracker.phase(), TrackerPhase::Failed);
        assert!(tracker.position().is_none());
    }

    #[test]
    fn ids_are_monotonic() {
        let mut tracker = PositionTracker::new();
        let a = tracker.begin();
        let b = tracker.begin();
        let c = tracker.begin();
        assert!(a < b && b < c);
    }
}
