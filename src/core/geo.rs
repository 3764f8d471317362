use crate::domain::model::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres using the spherical law of cosines.
///
/// `d = R * acos(sin(lat1)sin(lat2) + cos(lat1)cos(lat2)cos(lon1 - lon2))`
///
/// The `acos` argument is clamped to `[-1, 1]`: for coincident or antipodal
/// points rounding can push it just outside the domain, which would yield NaN.
pub fn great_circle_distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }

    let (lat1, lon1, lat2, lon2) = (
        a.latitude.to_radians(),
        a.longitude.to_radians(),
        b.latitude.to_radians(),
        b.longitude.to_radians(),
    );

    let cos_delta = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();
    EARTH_RADIUS_KM * cos_delta.clamp(-1.0, 1.0).acos()
}

impl GeoPoint {
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        great_circle_distance_km(self, other)
    }
}
