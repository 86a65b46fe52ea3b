//! PVT Solution
use crate::{
    navigation::DilutionOfPrecision,
    prelude::{Vector3, SV},
    time::TimeTag,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Data attached to each individual SV that helped form the solution.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SVContribution {
    /// [SV]
    pub sv: SV,
    /// Measurement residual of the last iteration [m]
    pub residual_m: f64,
    /// Azimuth from the solution, clockwise from north [deg]
    pub azimuth_deg: f64,
    /// Elevation above the local horizontal plane [deg]
    pub elevation_deg: f64,
}

impl SVContribution {
    /// Builds [SVContribution] from the satellite coordinates
    /// expressed in the local NED frame of the solution [m].
    pub(crate) fn from_ned(sv: SV, residual_m: f64, ned: &Vector3<f64>) -> Self {
        let horizontal = (ned[0].powi(2) + ned[1].powi(2)).sqrt();

        let mut azimuth_deg = ned[1].atan2(ned[0]).to_degrees();
        if azimuth_deg < 0.0 {
            azimuth_deg += 360.0;
        }

        Self {
            sv,
            residual_m,
            azimuth_deg,
            elevation_deg: (-ned[2]).atan2(horizontal).to_degrees(),
        }
    }
}

/// Point positioning solution.
/// Non convergence is not an error: the last iterate is kept
/// and [PVTSolution::converged] is set to false.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PVTSolution<T: TimeTag> {
    /// Time tag corrected by the clock offset estimate
    pub epoch: T,
    /// Position in meters ECEF
    pub position: Vector3<f64>,
    /// Receiver clock offset (s)
    pub clock_offset_s: f64,
    /// Number of iterations performed
    pub iterations: usize,
    /// True when the correction fell below the convergence threshold
    pub converged: bool,
    /// Space Vehicles that helped form this solution
    /// and data associated to each individual SV
    pub sv: Vec<SVContribution>,
    /// [DilutionOfPrecision], when the geometry allows it
    pub dop: Option<DilutionOfPrecision>,
}

impl<T: TimeTag> PVTSolution<T> {
    /// Residuals of the last iteration [m], in the order
    /// the measurements were provided.
    pub fn residuals(&self) -> Vec<f64> {
        self.sv.iter().map(|sv| sv.residual_m).collect()
    }
}
