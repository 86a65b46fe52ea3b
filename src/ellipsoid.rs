//! Reference ellipsoid

/// WGS84 Earth ellipsoid, used by all frame conversions.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Wgs84;

impl Wgs84 {
    /// Semi-major axis (m)
    pub const A: f64 = 6378137.0;

    /// Derived semi-minor axis (m)
    pub const B: f64 = 6356752.314245;

    /// Flattening
    pub const F: f64 = (Self::A - Self::B) / Self::A;

    /// Inverse flattening
    pub const F_INV: f64 = 1.0 / Self::F;

    /// Semi-major axis squared (m²)
    pub const A2: f64 = Self::A * Self::A;

    /// Semi-minor axis squared (m²)
    pub const B2: f64 = Self::B * Self::B;

    /// First eccentricity squared
    pub const E2: f64 = Self::F * (2.0 - Self::F);
}
