use crate::geo::LatLng;

/// Geographic bounding box in degrees (WGS84 min/max corners).
///
/// Longitude extents are naive min/max: a dataset straddling the
/// antimeridian fits the long way around rather than splitting.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Degenerate box covering a single point.
    pub fn around(p: LatLng) -> Self {
        Self::new(p.lat_deg, p.lon_deg, p.lat_deg, p.lon_deg)
    }

    /// Smallest box covering every point, `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::around(points.next()?);
        for p in points {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.min_lat = self.min_lat.min(p.lat_deg);
        self.max_lat = self.max_lat.max(p.lat_deg);
        self.min_lon = self.min_lon.min(p.lon_deg);
        self.max_lon = self.max_lon.max(p.lon_deg);
    }

    pub fn width_deg(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height_deg(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) * 0.5,
            (self.min_lon + self.max_lon) * 0.5,
        )
    }

    /// Inclusive containment.
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat_deg >= self.min_lat
            && p.lat_deg <= self.max_lat
            && p.lon_deg >= self.min_lon
            && p.lon_deg <= self.max_lon
    }

    /// Exclusive containment: `p` lies strictly inside every edge.
    pub fn contains_strict(&self, p: LatLng) -> bool {
        p.lat_deg > self.min_lat
            && p.lat_deg < self.max_lat
            && p.lon_deg > self.min_lon
            && p.lon_deg < self.max_lon
    }

    /// Expand any dimension narrower than `min_extent_deg` to that extent,
    /// about the box center. A box around a single point becomes a square.
    pub fn with_min_extent(self, min_extent_deg: f64) -> Self {
        let mut out = self;
        if out.width_deg() < min_extent_deg {
            let center_lon = (out.min_lon + out.max_lon) * 0.5;
            out.min_lon = center_lon - min_extent_deg * 0.5;
            out.max_lon = center_lon + min_extent_deg * 0.5;
        }
        if out.height_deg() < min_extent_deg {
            let center_lat = (out.min_lat + out.max_lat) * 0.5;
            out.min_lat = center_lat - min_extent_deg * 0.5;
            out.max_lat = center_lat + min_extent_deg * 0.5;
        }
        out
    }

    /// Grow every side by `fraction` of the larger dimension.
    ///
    /// The result is a camera request and is deliberately not clamped to the
    /// valid coordinate ranges; clamping would put edge points back on the
    /// boundary.
    pub fn padded(self, fraction: f64) -> Self {
        let pad = fraction * self.width_deg().max(self.height_deg());
        Self::new(
            self.min_lat - pad,
            self.min_lon - pad,
            self.max_lat + pad,
            self.max_lon + pad,
        )
    }
}
