/// 3D Position coordinates
use crate::{
    frame::{lla2ecef, lla2ned, Converter},
    prelude::{Error, Vector3},
};

/// [Position] describes one point both in ECEF and geodetic coordinates.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Position {
    /// ECEF coordinates in meters
    pub(crate) ecef: Vector3<f64>,
    /// Geodetic coordinates in radians
    pub(crate) geodetic: Vector3<f64>,
}

impl Position {
    /// Builds new [Position] from ECEF coordinates expressed in meter.
    /// Uses the default [Converter] settings.
    pub fn from_ecef(ecef: Vector3<f64>) -> Result<Self, Error> {
        Self::from_ecef_with(ecef, &Converter::default())
    }

    /// Builds new [Position] from ECEF coordinates expressed in meter,
    /// using this [Converter].
    pub fn from_ecef_with(ecef: Vector3<f64>, converter: &Converter) -> Result<Self, Error> {
        let geodetic = converter.ecef2lla(&ecef)?;
        Ok(Self { ecef, geodetic })
    }

    /// Builds new [Position] from Geodetic coordinates
    /// - latitude [rad]
    /// - longitude [rad]
    /// - altitude above the ellipsoid [m]
    pub fn from_geo(geodetic: Vector3<f64>) -> Self {
        Self {
            geodetic,
            ecef: lla2ecef(&geodetic),
        }
    }

    /// Builds new [Position] from Geodetic coordinates
    /// - latitude [ddeg]
    /// - longitude [ddeg]
    /// - altitude above the ellipsoid [m]
    pub fn from_geo_ddeg(geodetic: Vector3<f64>) -> Self {
        Self::from_geo(Vector3::new(
            geodetic[0].to_radians(),
            geodetic[1].to_radians(),
            geodetic[2],
        ))
    }

    /// Returns ECEF coordinates.
    pub fn ecef(&self) -> Vector3<f64> {
        self.ecef
    }

    /// Returns Geodetic coordinates
    /// - latitude [rad]
    /// - longitude [rad]
    /// - altitude above the ellipsoid [m]
    pub fn geodetic(&self) -> Vector3<f64> {
        self.geodetic
    }

    /// Returns Geodetic coordinates in decimal degrees
    pub fn geodetic_ddeg(&self) -> Vector3<f64> {
        Vector3::new(
            self.geodetic[0].to_degrees(),
            self.geodetic[1].to_degrees(),
            self.geodetic[2],
        )
    }

    /// Returns coordinates of `other` in the local NED frame of Self [m].
    pub fn ned_to(&self, other: &Self) -> Vector3<f64> {
        lla2ned(&self.geodetic, &other.geodetic)
    }
}

impl std::fmt::Display for Position {
    /*
     * Prints latitude, longitude in decimal degrees, altitude in meters
     */
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let ddeg = self.geodetic_ddeg();
        write!(f, "{}, {}, {}", ddeg[0], ddeg[1], ddeg[2])
    }
}
