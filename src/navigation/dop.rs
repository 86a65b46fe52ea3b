use nalgebra::{DMatrix, Matrix3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{frame::q_e2n, prelude::Vector3};

/// [DilutionOfPrecision] of a point positioning solution.
#[derive(Clone, Default, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DilutionOfPrecision {
    /// Geometric DOP
    pub gdop: f64,

    /// Position DOP
    pub pdop: f64,

    /// Horizontal DOP
    pub hdop: f64,

    /// Vertical DOP
    pub vdop: f64,

    /// Temporal DOP
    pub tdop: f64,
}

impl DilutionOfPrecision {
    /// Rotates the ECEF position block of Q into the local NED frame.
    pub(crate) fn q_ned(q: &DMatrix<f64>, lla: &Vector3<f64>) -> Matrix3<f64> {
        // maps NED to ECEF
        let r = q_e2n(lla).to_rotation_matrix().into_inner();

        let q_3 = Matrix3::<f64>::new(
            q[(0, 0)],
            q[(0, 1)],
            q[(0, 2)],
            q[(1, 0)],
            q[(1, 1)],
            q[(1, 2)],
            q[(2, 0)],
            q[(2, 1)],
            q[(2, 2)],
        );

        r.transpose() * q_3 * r
    }

    /// Creates new [DilutionOfPrecision].
    ///
    /// ## Input
    /// - g: n x 4 geometry matrix, unit line of sight vectors and clock column set to 1.
    /// - lla: geodetic coordinates of the solution
    ///
    /// ## Returns
    /// - None if G is rank deficient
    pub(crate) fn new(g: &DMatrix<f64>, lla: &Vector3<f64>) -> Option<Self> {
        if g.ncols() != 4 || g.nrows() < 4 {
            return None;
        }

        let q = (g.transpose() * g).try_inverse()?;
        let q_ned = Self::q_ned(&q, lla);

        Some(Self {
            gdop: q.trace().sqrt(),
            pdop: (q[(0, 0)] + q[(1, 1)] + q[(2, 2)]).sqrt(),
            hdop: (q_ned[(0, 0)] + q_ned[(1, 1)]).sqrt(),
            vdop: q_ned[(2, 2)].sqrt(),
            tdop: q[(3, 3)].sqrt(),
        })
    }
}
