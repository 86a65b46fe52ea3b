use nalgebra::Vector4;

use crate::prelude::Vector3;

/// Receiver [State] estimate, updated in place by each iteration.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct State {
    /// Position, ECEF [m]
    pub position: Vector3<f64>,
    /// Clock offset [s]
    pub clock_offset_s: f64,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x={:.3}m y={:.3}m z={:.3}m dt={:.11E}s",
            self.position[0], self.position[1], self.position[2], self.clock_offset_s,
        )
    }
}

impl State {
    /// Create new [State] from ECEF coordinates [m], with null clock offset.
    pub fn from_ecef_m(position: Vector3<f64>) -> Self {
        Self {
            position,
            clock_offset_s: 0.0,
        }
    }

    /// Applies the correction: 3 position components [m] and clock offset [s].
    pub fn update(&mut self, dx: &Vector4<f64>) {
        self.position[0] += dx[0];
        self.position[1] += dx[1];
        self.position[2] += dx[2];
        self.clock_offset_s += dx[3];
    }
}
