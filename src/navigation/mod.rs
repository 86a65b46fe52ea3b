mod dop;
mod solutions;
mod state;

pub use dop::DilutionOfPrecision;
pub use solutions::{PVTSolution, SVContribution};

pub(crate) use state::State;

use itertools::Itertools;
use log::{debug, error};
use nalgebra::{DMatrix, DVector, Vector4};

use crate::{
    cfg::SolverOpts,
    prelude::{Error, SatelliteModel, Vector2, Vector3},
    time::TimeTag,
};

/// Minimal number of measurements: 3 position components and the clock offset.
pub(crate) const MIN_SIZE: usize = 4;

/// Convergence threshold of the singular value decomposition.
const SVD_EPSILON: f64 = 1.0E-12;

/// Maximal number of sweeps of the singular value decomposition.
const SVD_MAX_ITERATIONS: usize = 1000;

/// Singular values below this fraction of the largest one
/// are considered null: the geometry does not observe all 4 unknowns.
const MIN_RELATIVE_SINGULAR_VALUE: f64 = 1.0E-6;

/// Linearized point positioning system `A.dx = b`, formed at one [State].
#[derive(Debug, Clone)]
pub(crate) struct Navigation {
    /// Residuals [m]
    pub b: DVector<f64>,
    /// Design matrix: unit line of sight and speed of light
    pub a: DMatrix<f64>,
    /// Satellite positions used to form the system, ECEF [m]
    pub sv_positions: Vec<Vector3<f64>>,
    /// Speed of light [m/s]
    c: f64,
}

impl Navigation {
    /// Create new [Navigation] system. Measurements and satellites
    /// must be index aligned, this is verified by the [Solver](crate::prelude::Solver).
    /// ## Input
    /// - t: time tag of the measurements
    /// - opts: [SolverOpts] preset
    /// - measurements: pseudo range observations [m]
    /// - satellites: index aligned [SatelliteModel]s
    /// - state: current [State] estimate
    pub fn new<T: TimeTag, S: SatelliteModel<T>>(
        t: T,
        opts: &SolverOpts,
        measurements: &[f64],
        satellites: &[S],
        state: &State,
    ) -> Self {
        let size = satellites.len();

        let mut b = DVector::<f64>::zeros(size);
        let mut a = DMatrix::<f64>::zeros(size, 4);
        let mut sv_positions = Vec::with_capacity(size);

        let c = opts.speed_of_light_m_s;

        for (i, (z, sat)) in measurements.iter().zip_eq(satellites.iter()).enumerate() {
            let sv_state = sat.position_velocity_clock(t);

            // only geometric range and clock offset are modeled
            let zhat = sat.predict_measurement(
                t,
                &state.position,
                &Vector3::zeros(),
                &Vector2::zeros(),
            ) + c * state.clock_offset_s;

            b[i] = z - zhat;

            let los = (state.position - sv_state.position).normalize();
            a[(i, 0)] = los[0];
            a[(i, 1)] = los[1];
            a[(i, 2)] = los[2];
            a[(i, 3)] = c;

            debug!("{:?} ({}) residual: {:.3}m", t, sat.sv(), b[i]);

            sv_positions.push(sv_state.position);
        }

        Self {
            b,
            a,
            sv_positions,
            c,
        }
    }

    /// Solves the least squares system, returning the state correction:
    /// 3 position components [m] and the clock offset [s].
    ///
    /// ## Returns
    /// - [Error::MatrixFormationError] when the system holds non finite values
    /// - [Error::MatrixInversion] when the decomposition fails or the
    ///   geometry does not observe all 4 unknowns
    pub fn resolve(&self) -> Result<Vector4<f64>, Error> {
        if !self.b.iter().chain(self.a.iter()).all(|v| v.is_finite()) {
            error!("non finite navigation system: {}{}", self.a, self.b);
            return Err(Error::MatrixFormationError);
        }

        // clock column scaled to 1: the clock unknown is c.dt [m]
        let svd = self
            .geometry()
            .try_svd(true, true, SVD_EPSILON, SVD_MAX_ITERATIONS)
            .ok_or(Error::MatrixInversion)?;

        let sigma_max = svd.singular_values.max();
        let rank = svd.rank(sigma_max * MIN_RELATIVE_SINGULAR_VALUE);
        if rank < MIN_SIZE {
            error!(
                "degenerate geometry: rank {} (singular values {:?})",
                rank,
                svd.singular_values.as_slice()
            );
            return Err(Error::MatrixInversion);
        }

        let dx = svd
            .solve(&self.b, SVD_EPSILON)
            .map_err(|_| Error::MatrixInversion)?;

        Ok(Vector4::new(dx[0], dx[1], dx[2], dx[3] / self.c))
    }

    /// Geometry matrix with normalized clock column,
    /// used by the least squares solver and the dilution of precision evaluation.
    pub fn geometry(&self) -> DMatrix<f64> {
        let mut g = self.a.clone();
        g.column_mut(3).fill(1.0);
        g
    }
}
