use std::fmt::Debug;

use hifitime::{Epoch, Unit};

/// Time tag consumed by the [Solver](crate::prelude::Solver).
/// The solver never inspects it: the time tag is forwarded
/// to the [SatelliteModel](crate::prelude::SatelliteModel) and corrected
/// with the receiver clock offset estimate.
pub trait TimeTag: Copy + PartialOrd + Debug {
    /// Returns a copy of Self, corrected by this amount of seconds.
    fn corrected(&self, dt_s: f64) -> Self;
}

impl TimeTag for Epoch {
    fn corrected(&self, dt_s: f64) -> Self {
        *self + dt_s * Unit::Second
    }
}

/// Elapsed seconds, for applications that do not need
/// a complete time representation.
impl TimeTag for f64 {
    fn corrected(&self, dt_s: f64) -> Self {
        *self + dt_s
    }
}
