/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 mean radius (meters), used for great-circle distances.
pub const WGS84_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Geographic position in degrees.
///
/// Valid latitudes are [-90, 90], valid longitudes [-180, 180]. Nothing in
/// this workspace clamps a coordinate; out-of-range values are rejected at
/// the boundaries that receive them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GeoError {
    InvalidCoordinate { lat_deg: f64, lon_deg: f64 },
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::InvalidCoordinate { lat_deg, lon_deg } => {
                write!(f, "coordinate out of range: ({lat_deg}, {lon_deg})")
            }
        }
    }
}

impl std::error::Error for GeoError {}

impl LatLng {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Non-finite values fail the range checks along with out-of-range ones.
    pub fn validate(&self) -> Result<(), GeoError> {
        if (-90.0..=90.0).contains(&self.lat_deg) && (-180.0..=180.0).contains(&self.lon_deg) {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                lat_deg: self.lat_deg,
                lon_deg: self.lon_deg,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Great-circle distance in meters (haversine on the WGS84 mean radius).
pub fn haversine_m(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat_deg.to_radians();
    let lat_b = b.lat_deg.to_radians();
    let dlat = (b.lat_deg - a.lat_deg).to_radians();
    let dlon = (b.lon_deg - a.lon_deg).to_radians();

    let h = (dlat * 0.5).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlon * 0.5).sin().powi(2);
    2.0 * WGS84_MEAN_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::{LatLng, haversine_m};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn validate_accepts_range_limits() {
        assert!(LatLng::new(90.0, 180.0).is_valid());
        assert!(LatLng::new(-90.0, -180.0).is_valid());
        assert!(LatLng::new(0.0, 0.0).is_valid());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(!LatLng::new(90.001, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -180.5).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
        assert!(!LatLng::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = LatLng::new(51.505, -0.09);
        assert_close(haversine_m(p, p), 0.0, 1e-9);
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0, 0.0);
        // One degree of latitude is roughly 111.2 km on the mean sphere.
        assert_close(haversine_m(a, b), 111_195.0, 100.0)
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = LatLng::new(51.505, -0.09);
        let b = LatLng::new(51.51, -0.1);
        assert_close(haversine_m(a, b), haversine_m(b, a), 1e-9);
    }
}
