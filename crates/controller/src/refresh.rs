use foundation::geo::{LatLng, haversine_m};

/// Decides when the viewer has moved far enough that the nearby feed is
/// worth refetching.
///
/// The entity data source is external; this only answers "has the viewer
/// displaced more than the threshold since the last fetch".
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshPolicy {
    pub threshold_m: f64,
    last_fetch_at: Option<LatLng>,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(250.0)
    }
}

impl RefreshPolicy {
    pub fn new(threshold_m: f64) -> Self {
        Self {
            threshold_m,
            last_fetch_at: None,
        }
    }

    /// True when nothing has been fetched yet, or the displacement since
    /// the last fetch exceeds the threshold.
    pub fn should_refresh(&self, position: LatLng) -> bool {
        match self.last_fetch_at {
            None => true,
            Some(last) => haversine_m(last, position) > self.threshold_m,
        }
    }

    pub fn mark_fetched(&mut self, position: LatLng) {
        self.last_fetch_at = Some(position);
    }
}
