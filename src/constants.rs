/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Threshold below which a point is considered to lie on the polar axis,
/// in squared meters of equatorial distance.
pub(crate) const POLAR_AXIS_R2_M2: f64 = 1.0E-12;
