#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod cfg;
mod constants;
mod ellipsoid;
mod error;
mod frame;
mod navigation;
mod position;
mod satellite;
mod solver;
mod time;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, GeodeticOpts, SolverOpts};
    pub use crate::constants::SPEED_OF_LIGHT_M_S;
    pub use crate::ellipsoid::Wgs84;
    pub use crate::error::Error;
    pub use crate::frame::{
        ecef2ned, lla2ecef, lla2ned, ned2ecef, q_e2n, x_lla2ned, Converter, FrameTransform,
    };
    pub use crate::navigation::{DilutionOfPrecision, PVTSolution, SVContribution};
    pub use crate::position::Position;
    pub use crate::satellite::{SatelliteModel, SatelliteState};
    pub use crate::solver::Solver;
    pub use crate::time::TimeTag;
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::{Isometry3, UnitQuaternion, Vector2, Vector3};
}

// pub export
pub use error::Error;
