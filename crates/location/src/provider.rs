use foundation::geo::LatLng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    PermissionDenied,
    Timeout,
    Acquisition(String),
}

impl std::fmt::Display for AcquireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquireError::PermissionDenied => write!(f, "location permission denied"),
            AcquireError::Timeout => write!(f, "location acquisition timed out"),
            AcquireError::Acquisition(msg) => write!(f, "location acquisition failed: {msg}"),
        }
    }
}

impl std::error::Error for AcquireError {}

/// Source of device position fixes.
///
/// The seam is synchronous; a host with an async platform API drives
/// `PositionTracker::begin`/`resolve` directly and lets the acquisition-id
/// discipline sort out overlapping requests.
pub trait LocationProvider {
    fn request_position(&mut self) -> Result<LatLng, AcquireError>;
}
