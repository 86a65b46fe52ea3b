#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::SPEED_OF_LIGHT_M_S;

fn default_geodetic_tolerance() -> f64 {
    1.0E-4
}

fn default_geodetic_iterations() -> usize {
    50
}

fn default_solver_tolerance() -> f64 {
    1.0E-4
}

fn default_solver_iterations() -> usize {
    10
}

fn default_speed_of_light() -> f64 {
    SPEED_OF_LIGHT_M_S
}

/// ECEF to geodetic conversion settings.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticOpts {
    /// The iteration stops once the altitude-augmented z
    /// coordinate moves by less than this amount [m].
    #[cfg_attr(feature = "serde", serde(default = "default_geodetic_tolerance"))]
    pub tolerance_m: f64,
    /// Iteration cap. Reaching it is reported as a convergence failure.
    #[cfg_attr(feature = "serde", serde(default = "default_geodetic_iterations"))]
    pub max_iterations: usize,
}

impl Default for GeodeticOpts {
    fn default() -> Self {
        Self {
            tolerance_m: default_geodetic_tolerance(),
            max_iterations: default_geodetic_iterations(),
        }
    }
}

impl GeodeticOpts {
    /// Copies and returns [GeodeticOpts] with updated tolerance [m]
    pub fn with_tolerance_m(&self, tolerance_m: f64) -> Self {
        let mut s = *self;
        s.tolerance_m = tolerance_m;
        s
    }

    /// Copies and returns [GeodeticOpts] with updated iteration cap
    pub fn with_max_iterations(&self, max_iterations: usize) -> Self {
        let mut s = *self;
        s.max_iterations = max_iterations;
        s
    }
}

/// Point positioning [Solver](crate::prelude::Solver) settings.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverOpts {
    /// Convergence threshold on the norm of the state correction.
    #[cfg_attr(feature = "serde", serde(default = "default_solver_tolerance"))]
    pub tolerance: f64,
    /// Maximal number of Gauss-Newton iterations.
    #[cfg_attr(feature = "serde", serde(default = "default_solver_iterations"))]
    pub max_iterations: usize,
    /// Speed of light [m.s⁻¹] relating the clock offset to the pseudo range.
    #[cfg_attr(feature = "serde", serde(default = "default_speed_of_light"))]
    pub speed_of_light_m_s: f64,
}

impl Default for SolverOpts {
    fn default() -> Self {
        Self {
            tolerance: default_solver_tolerance(),
            max_iterations: default_solver_iterations(),
            speed_of_light_m_s: default_speed_of_light(),
        }
    }
}

impl SolverOpts {
    /// Copies and returns [SolverOpts] with updated convergence threshold
    pub fn with_tolerance(&self, tolerance: f64) -> Self {
        let mut s = *self;
        s.tolerance = tolerance;
        s
    }

    /// Copies and returns [SolverOpts] with updated iteration cap
    pub fn with_max_iterations(&self, max_iterations: usize) -> Self {
        let mut s = *self;
        s.max_iterations = max_iterations;
        s
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Frame conversion settings
    #[cfg_attr(feature = "serde", serde(default))]
    pub geodetic: GeodeticOpts,
    /// Point positioning settings
    #[cfg_attr(feature = "serde", serde(default))]
    pub solver: SolverOpts,
}

impl Config {
    /// Copies and returns [Config] with updated [GeodeticOpts]
    pub fn with_geodetic_opts(&self, opts: GeodeticOpts) -> Self {
        let mut s = *self;
        s.geodetic = opts;
        s
    }

    /// Copies and returns [Config] with updated [SolverOpts]
    pub fn with_solver_opts(&self, opts: SolverOpts) -> Self {
        let mut s = *self;
        s.solver = opts;
        s
    }
}
