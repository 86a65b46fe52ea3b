//! Point positioning solver
use log::{debug, error, warn};

use crate::{
    cfg::Config,
    frame::{ecef2ned, x_lla2ned, Converter},
    navigation::{DilutionOfPrecision, Navigation, PVTSolution, SVContribution, State, MIN_SIZE},
    prelude::{Error, SatelliteModel, Vector3},
    time::TimeTag,
};

/// [Solver] estimates the receiver position and clock offset
/// from pseudo range measurements, by Gauss-Newton iterations.
///
/// This is a local, unweighted method without step damping:
/// a seed far from the truth or a degenerate geometry may prevent
/// convergence within the iteration cap.
#[derive(Debug, Default, Clone)]
pub struct Solver {
    /// [Config] preset
    cfg: Config,
    /// Frame [Converter]
    converter: Converter,
}

impl Solver {
    /// Creates a new [Solver] from this [Config] preset.
    pub fn new(cfg: Config) -> Self {
        Self {
            converter: Converter::new(cfg.geodetic),
            cfg,
        }
    }

    /// Returns [Config] in use
    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    /// Point positioning.
    ///
    /// ## Input
    /// - t: time tag of the measurements, forwarded to the [SatelliteModel]s
    /// - measurements: pseudo range observations [m]
    /// - satellites: [SatelliteModel]s, index aligned with the measurements
    /// - seed: initial position estimate, ECEF [m]
    ///
    /// ## Returns
    /// - [PVTSolution] holding the last iterate. Check [PVTSolution::converged].
    /// - [Error::NotEnoughCandidates] when less than 4 satellites are proposed
    /// - [Error::MeasurementMismatch] when the two sequences are not aligned
    /// - [Error::InvalidIterationCap] when the iteration cap is null
    /// - [Error::MatrixFormationError] on non finite measurements, or when an
    ///   iterate lands on a satellite
    /// - [Error::MatrixInversion] on degenerate geometry
    pub fn point_positioning<T: TimeTag, S: SatelliteModel<T>>(
        &self,
        t: T,
        measurements: &[f64],
        satellites: &[S],
        seed: Vector3<f64>,
    ) -> Result<PVTSolution<T>, Error> {
        if measurements.len() != satellites.len() {
            error!(
                "{:?} - {} measurements for {} satellites",
                t,
                measurements.len(),
                satellites.len()
            );
            return Err(Error::MeasurementMismatch);
        }

        if satellites.len() < MIN_SIZE {
            error!(
                "{:?} - not enough candidates: {} < {}",
                t,
                satellites.len(),
                MIN_SIZE
            );
            return Err(Error::NotEnoughCandidates);
        }

        let opts = &self.cfg.solver;
        if opts.max_iterations == 0 {
            error!("{:?} - invalid iteration cap", t);
            return Err(Error::InvalidIterationCap);
        }

        let mut state = State::from_ecef_m(seed);
        let mut iterations = 0;

        let (nav, converged) = loop {
            iterations += 1;

            let nav = Navigation::new(t, opts, measurements, satellites, &state);
            let dx = nav.resolve()?;

            state.update(&dx);

            let norm = dx.norm();
            debug!("{:?} - iter #{} |dx|={:.3E} {}", t, iterations, norm, state);

            let converged = norm <= opts.tolerance;
            if converged || iterations >= opts.max_iterations {
                break (nav, converged);
            }
        };

        if !converged {
            warn!(
                "{:?} - no convergence after {} iterations: {}",
                t, iterations, state
            );
        }

        Ok(self.solution(t, &state, &nav, satellites, iterations, converged))
    }

    /// Forms the [PVTSolution] from the last iterate.
    fn solution<T: TimeTag, S: SatelliteModel<T>>(
        &self,
        t: T,
        state: &State,
        nav: &Navigation,
        satellites: &[S],
        iterations: usize,
        converged: bool,
    ) -> PVTSolution<T> {
        let (sv, dop) = match self.converter.ecef2lla(&state.position) {
            Ok(lla) => {
                let x_e2n = x_lla2ned(&lla);

                let sv = satellites
                    .iter()
                    .zip(nav.sv_positions.iter())
                    .enumerate()
                    .map(|(i, (sat, sv_pos))| {
                        SVContribution::from_ned(sat.sv(), nav.b[i], &ecef2ned(&x_e2n, sv_pos))
                    })
                    .collect::<Vec<_>>();

                let dop = DilutionOfPrecision::new(&nav.geometry(), &lla);

                (sv, dop)
            },
            Err(e) => {
                error!("{:?} - invalid solution: {}", t, e);

                let sv = satellites
                    .iter()
                    .enumerate()
                    .map(|(i, sat)| SVContribution {
                        sv: sat.sv(),
                        residual_m: nav.b[i],
                        azimuth_deg: f64::NAN,
                        elevation_deg: f64::NAN,
                    })
                    .collect::<Vec<_>>();

                (sv, None)
            },
        };

        PVTSolution {
            epoch: t.corrected(state.clock_offset_s),
            position: state.position,
            clock_offset_s: state.clock_offset_s,
            iterations,
            converged,
            sv,
            dop,
        }
    }
}
