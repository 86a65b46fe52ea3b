use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum Error {
    /// ECEF to geodetic conversion did not reach the requested tolerance
    /// within the iteration cap. Happens for pathological inputs
    /// like the Earth center.
    #[error("geodetic conversion did not converge after {0} iterations")]
    GeodeticConvergence(usize),

    /// Point positioning requires at least 4 satellites in sight.
    /// This is checked prior any attempt.
    #[error("not enough candidates provided: need 4 or more")]
    NotEnoughCandidates,

    /// Measurements and satellite handles must be index aligned.
    #[error("measurements and satellites do not have the same length")]
    MeasurementMismatch,

    /// Solver iteration cap must allow at least one iteration.
    #[error("invalid solver options: iteration cap must be 1 or more")]
    InvalidIterationCap,

    /// Non finite values in the linear system: invalid measurement,
    /// or estimate located on a satellite.
    #[error("failed to form matrix (invalid input)")]
    MatrixFormationError,

    /// The least squares decomposition failed, or the satellite geometry
    /// does not observe the 3 position components and the clock offset.
    #[error("failed to solve linear system")]
    MatrixInversion,
}
