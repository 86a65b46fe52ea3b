use crate::{
    prelude::{Vector2, Vector3, SV},
    time::TimeTag,
};

/// Satellite state at a given instant, as provided by your [SatelliteModel].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SatelliteState {
    /// Antenna phase center position, ECEF [m]
    pub position: Vector3<f64>,
    /// Velocity, ECEF [m.s⁻¹]
    pub velocity: Vector3<f64>,
    /// Clock bias [s] and drift [s.s⁻¹]
    pub clock_bias: Vector2<f64>,
}

impl SatelliteState {
    /// Builds a new [SatelliteState] from position only.
    pub fn from_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Copies and returns [SatelliteState] with updated velocity [m.s⁻¹]
    pub fn with_velocity(&self, velocity: Vector3<f64>) -> Self {
        let mut s = *self;
        s.velocity = velocity;
        s
    }

    /// Copies and returns [SatelliteState] with updated clock bias [s] and drift [s.s⁻¹]
    pub fn with_clock_bias(&self, clock_bias: Vector2<f64>) -> Self {
        let mut s = *self;
        s.clock_bias = clock_bias;
        s
    }
}

/// Any satellite handle should implement the [SatelliteModel] trait
/// to contribute to the point positioning process.
///
/// Orbit propagation, satellite clock correction and atmospheric delays
/// are your responsibility: the solver only consumes their results.
pub trait SatelliteModel<T: TimeTag> {
    /// [SV] identity, only used in logs.
    fn sv(&self) -> SV;

    /// Provide the [SatelliteState] at requested instant.
    fn position_velocity_clock(&self, t: T) -> SatelliteState;

    /// Predict the pseudo range [m] a receiver located at `position` (ECEF [m]),
    /// moving at `velocity` [m.s⁻¹] with this clock bias [s] and drift [s.s⁻¹],
    /// would observe at requested instant.
    fn predict_measurement(
        &self,
        t: T,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        clock_bias: &Vector2<f64>,
    ) -> f64;
}
