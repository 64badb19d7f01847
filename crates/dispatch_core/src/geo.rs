//! Geographic primitives: coordinate validation and great-circle distance.
//!
//! This module provides:
//!
//! - **GeoPoint**: a validated latitude/longitude pair
//! - **Distance calculation**: great-circle distance in kilometers
//!
//! Pickup coordinates arrive from mobile clients as optional raw floats and
//! are frequently absent or junk; `GeoPoint::from_parts` is the single
//! gatekeeper deciding whether a pair is usable for geographic matching.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated coordinate pair. Construction via [`GeoPoint::from_parts`]
/// guarantees both components are present, finite, and in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Validate a raw coordinate pair as reported by a client.
    ///
    /// Returns `None` when the pair is unusable for matching:
    /// either component absent or non-finite, latitude outside [-90, 90],
    /// longitude outside [-180, 180], or exactly (0, 0) — devices without a
    /// fix report the origin, so it is treated as "no location" rather than
    /// a real point in the Gulf of Guinea.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        let (lat, lon) = (lat?, lon?);
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        if lat == 0.0 && lon == 0.0 {
            return None;
        }
        Some(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Spherical law of cosines:
/// `6371 * acos(cos(lat1)·cos(lat2)·cos(lon2−lon1) + sin(lat1)·sin(lat2))`,
/// all angles in radians. The acos argument is clamped to [-1, 1] so
/// identical or antipodal points cannot drift outside the domain and
/// produce NaN.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let central = lat1.cos() * lat2.cos() * (lon2 - lon1).cos() + lat1.sin() * lat2.sin();
    EARTH_RADIUS_KM * central.clamp(-1.0, 1.0).acos()
}
