//! ECEF, geodetic and local NED frame conversions
use std::f64::consts::FRAC_PI_2;

use log::error;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

use crate::{cfg::GeodeticOpts, constants::POLAR_AXIS_R2_M2, ellipsoid::Wgs84, prelude::Error};

/// Rigid transform between a parent (world) frame and a local frame.
/// A frame pose converts local coordinates into the parent frame,
/// and parent coordinates into local coordinates.
pub trait FrameTransform {
    /// Expresses a parent frame point in the local frame.
    fn to_local(&self, point: &Vector3<f64>) -> Vector3<f64>;

    /// Expresses a local frame point in the parent frame.
    fn to_parent(&self, point: &Vector3<f64>) -> Vector3<f64>;
}

impl FrameTransform for Isometry3<f64> {
    fn to_local(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.inverse_transform_point(&Point3::from(*point)).coords
    }

    fn to_parent(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.transform_point(&Point3::from(*point)).coords
    }
}

/// Rotation from ECEF to the local NED frame located at this
/// geodetic point (latitude [rad], longitude [rad], altitude [m]).
/// Rotation about the ECEF Z axis by longitude, then about the rotated
/// Y axis by -π/2 - latitude.
pub fn q_e2n(lla: &Vector3<f64>) -> UnitQuaternion<f64> {
    let q1 = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), lla[1]);
    let q2 = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -FRAC_PI_2 - lla[0]);
    q1 * q2
}

/// Converts geodetic coordinates (latitude [rad], longitude [rad], altitude [m])
/// to ECEF [m].
pub fn lla2ecef(lla: &Vector3<f64>) -> Vector3<f64> {
    let (sinp, cosp) = lla[0].sin_cos();
    let (sinl, cosl) = lla[1].sin_cos();
    let v = Wgs84::A / (1.0 - Wgs84::E2 * sinp * sinp).sqrt();

    Vector3::new(
        (v + lla[2]) * cosp * cosl,
        (v + lla[2]) * cosp * sinl,
        (v * (1.0 - Wgs84::E2) + lla[2]) * sinp,
    )
}

/// Builds the ECEF to NED frame pose located at this geodetic point.
pub fn x_lla2ned(lla0: &Vector3<f64>) -> Isometry3<f64> {
    Isometry3::from_parts(Translation3::from(lla2ecef(lla0)), q_e2n(lla0))
}

/// Expresses an ECEF point [m] in the local NED frame described by `x_e2n`.
pub fn ecef2ned<X: FrameTransform>(x_e2n: &X, ecef: &Vector3<f64>) -> Vector3<f64> {
    x_e2n.to_local(ecef)
}

/// Expresses a local NED point [m] in ECEF, `x_e2n` describing the NED frame.
pub fn ned2ecef<X: FrameTransform>(x_e2n: &X, ned: &Vector3<f64>) -> Vector3<f64> {
    x_e2n.to_parent(ned)
}

/// NED coordinates [m] of `lla`, in the local frame located at `lla0`.
pub fn lla2ned(lla0: &Vector3<f64>, lla: &Vector3<f64>) -> Vector3<f64> {
    ecef2ned(&x_lla2ned(lla0), &lla2ecef(lla))
}

/// [Converter] gathers the conversions that depend on the iterative
/// ECEF to geodetic step, so they share the same [GeodeticOpts].
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Converter {
    opts: GeodeticOpts,
}

impl Converter {
    /// Builds a new [Converter] with custom [GeodeticOpts]
    pub fn new(opts: GeodeticOpts) -> Self {
        Self { opts }
    }

    /// Returns [GeodeticOpts] in use
    pub fn opts(&self) -> &GeodeticOpts {
        &self.opts
    }

    /// Converts ECEF [m] to geodetic coordinates
    /// (latitude [rad], longitude [rad], altitude [m]).
    ///
    /// On the polar axis, longitude is undefined and conventionally set to 0,
    /// latitude is ±π/2 depending on the sign of z.
    pub fn ecef2lla(&self, ecef: &Vector3<f64>) -> Result<Vector3<f64>, Error> {
        let r2 = ecef[0] * ecef[0] + ecef[1] * ecef[1];

        let mut z = ecef[2];
        let mut v;
        let mut iter = 0;

        loop {
            if iter == self.opts.max_iterations {
                error!(
                    "ecef2lla: no convergence after {} iterations ({:?})",
                    iter, ecef
                );
                return Err(Error::GeodeticConvergence(iter));
            }

            iter += 1;

            let zk = z;
            let sinp = z / (r2 + z * z).sqrt();
            v = Wgs84::A / (1.0 - Wgs84::E2 * sinp * sinp).sqrt();
            // the correction always applies to the original z
            z = ecef[2] + v * Wgs84::E2 * sinp;

            if (z - zk).abs() < self.opts.tolerance_m {
                break;
            }
        }

        let (lat, lon) = if r2 > POLAR_AXIS_R2_M2 {
            ((z / r2.sqrt()).atan(), ecef[1].atan2(ecef[0]))
        } else if ecef[2] > 0.0 {
            (FRAC_PI_2, 0.0)
        } else {
            (-FRAC_PI_2, 0.0)
        };

        Ok(Vector3::new(lat, lon, (r2 + z * z).sqrt() - v))
    }

    /// Builds the ECEF to NED frame pose located at this ECEF point [m].
    /// The pose translation is the reference point itself.
    pub fn x_ecef2ned(&self, ecef: &Vector3<f64>) -> Result<Isometry3<f64>, Error> {
        let lla = self.ecef2lla(ecef)?;
        Ok(Isometry3::from_parts(
            Translation3::from(*ecef),
            q_e2n(&lla),
        ))
    }

    /// Geodetic coordinates of a point expressed in the local
    /// NED frame [m] located at `lla0`.
    pub fn ned2lla(&self, lla0: &Vector3<f64>, ned: &Vector3<f64>) -> Result<Vector3<f64>, Error> {
        self.ecef2lla(&ned2ecef(&x_lla2ned(lla0), ned))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::init_logger;

    use rand::{rngs::SmallRng, Rng, SeedableRng};
    use rstest::*;

    use std::f64::consts::PI;

    const MAX_ANGLE_ERR_RAD: f64 = 1.0E-6;
    const MAX_ALT_ERR_M: f64 = 1.0E-3;

    #[fixture]
    fn converter() -> Converter {
        init_logger();
        Converter::default()
    }

    fn assert_lla_eq(lla: &Vector3<f64>, expected: &Vector3<f64>) {
        assert!(
            (lla[0] - expected[0]).abs() < MAX_ANGLE_ERR_RAD,
            "latitude error too large: {} {}",
            lla,
            expected
        );
        assert!(
            (lla[1] - expected[1]).abs() < MAX_ANGLE_ERR_RAD,
            "longitude error too large: {} {}",
            lla,
            expected
        );
        assert!(
            (lla[2] - expected[2]).abs() < MAX_ALT_ERR_M,
            "altitude error too large: {} {}",
            lla,
            expected
        );
    }

    #[rstest]
    #[case(Vector3::new(Wgs84::A, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0))]
    #[case(Vector3::new(0.0, Wgs84::A, 0.0), Vector3::new(0.0, FRAC_PI_2, 0.0))]
    #[case(Vector3::new(-Wgs84::A - 10.0, 0.0, 0.0), Vector3::new(0.0, PI, 10.0))]
    #[case(Vector3::new(0.0, 0.0, Wgs84::B), Vector3::new(FRAC_PI_2, 0.0, 0.0))]
    #[case(Vector3::new(0.0, 0.0, -Wgs84::B - 100.0), Vector3::new(-FRAC_PI_2, 0.0, 100.0))]
    fn ecef2lla_reference_points(
        converter: Converter,
        #[case] ecef: Vector3<f64>,
        #[case] expected: Vector3<f64>,
    ) {
        let lla = converter.ecef2lla(&ecef).unwrap();
        assert_lla_eq(&lla, &expected);
    }

    #[rstest]
    #[case(1.0)]
    #[case(1.0E3)]
    #[case(Wgs84::B + 1.0E3)]
    #[case(2.0E7)]
    fn polar_axis(converter: Converter, #[case] h: f64) {
        let north = converter.ecef2lla(&Vector3::new(0.0, 0.0, h)).unwrap();
        assert_eq!(north[0], FRAC_PI_2);
        assert_eq!(north[1], 0.0);

        let south = converter.ecef2lla(&Vector3::new(0.0, 0.0, -h)).unwrap();
        assert_eq!(south[0], -FRAC_PI_2);
        assert_eq!(south[1], 0.0);

        assert!((north[2] - south[2]).abs() < MAX_ALT_ERR_M);
    }

    #[rstest]
    fn earth_center_does_not_converge(converter: Converter) {
        match converter.ecef2lla(&Vector3::zeros()) {
            Err(Error::GeodeticConvergence(iter)) => {
                assert_eq!(iter, converter.opts().max_iterations)
            },
            other => panic!("earth center should not converge: {:?}", other),
        }
    }

    #[test]
    fn iteration_cap() {
        init_logger();
        let converter = Converter::new(GeodeticOpts::default().with_max_iterations(1));
        let ecef = lla2ecef(&Vector3::new(0.7, 0.1, 100.0));
        assert_eq!(
            converter.ecef2lla(&ecef),
            Err(Error::GeodeticConvergence(1))
        );

        let converter = Converter::new(GeodeticOpts::default().with_max_iterations(10));
        assert!(converter.ecef2lla(&ecef).is_ok());
    }

    #[rstest]
    fn lla_ecef_roundtrip(converter: Converter) {
        let mut rng = SmallRng::seed_from_u64(0);

        for _ in 0..1000 {
            let lla = Vector3::new(
                rng.random_range(-1.5..1.5),
                rng.random_range(-3.14..3.14),
                rng.random_range(-500.0..1.0E5),
            );

            let ecef = lla2ecef(&lla);
            let back = converter.ecef2lla(&ecef).unwrap();
            assert_lla_eq(&back, &lla);
        }
    }

    #[rstest]
    fn ecef_lla_roundtrip(converter: Converter) {
        let mut rng = SmallRng::seed_from_u64(1);

        for _ in 0..1000 {
            let ecef = Vector3::new(
                rng.random_range(-7.0E6..7.0E6),
                rng.random_range(-7.0E6..7.0E6),
                rng.random_range(-7.0E6..7.0E6),
            );

            if ecef.norm() < 6.0E6 {
                // stay in the near Earth domain
                continue;
            }

            let lla = converter.ecef2lla(&ecef).unwrap();
            assert!(lla[1] > -PI && lla[1] <= PI);

            let back = lla2ecef(&lla);
            for i in 0..3 {
                assert!(
                    (back[i] - ecef[i]).abs() < 1.0E-3,
                    "ecef roundtrip error too large: {} {}",
                    back,
                    ecef
                );
            }
        }
    }

    #[test]
    fn ned_axes() {
        let lla0 = Vector3::new(0.0, 0.0, 0.0);
        let x_e2n = x_lla2ned(&lla0);

        // on the equator at lon=0: north=+z, east=+y, down=-x
        let north = ned2ecef(&x_e2n, &Vector3::new(1.0, 0.0, 0.0)) - lla2ecef(&lla0);
        let east = ned2ecef(&x_e2n, &Vector3::new(0.0, 1.0, 0.0)) - lla2ecef(&lla0);
        let down = ned2ecef(&x_e2n, &Vector3::new(0.0, 0.0, 1.0)) - lla2ecef(&lla0);

        assert!((north - Vector3::z()).norm() < 1.0E-6, "north: {}", north);
        assert!((east - Vector3::y()).norm() < 1.0E-6, "east: {}", east);
        assert!((down + Vector3::x()).norm() < 1.0E-6, "down: {}", down);
    }

    #[rstest]
    #[case(Vector3::new(0.7, 0.1, 100.0))]
    #[case(Vector3::new(-0.4, -2.5, 0.0))]
    #[case(Vector3::new(1.2, 3.0, 2500.0))]
    fn ned_displacements(#[case] lla0: Vector3<f64>) {
        let up = Vector3::new(lla0[0], lla0[1], lla0[2] + 10.0);
        let ned = lla2ned(&lla0, &up);
        assert!((ned - Vector3::new(0.0, 0.0, -10.0)).norm() < 1.0E-6);

        let north = Vector3::new(lla0[0] + 1.0E-5, lla0[1], lla0[2]);
        let ned = lla2ned(&lla0, &north);
        assert!(ned[0] > 60.0, "north offset: {}", ned);
        assert!(ned[1].abs() < 1.0E-6, "north offset: {}", ned);

        let east = Vector3::new(lla0[0], lla0[1] + 1.0E-5, lla0[2]);
        let ned = lla2ned(&lla0, &east);
        assert!(ned[1] > 0.0, "east offset: {}", ned);
        assert!(ned[0].abs() < 1.0E-3, "east offset: {}", ned);
    }

    #[rstest]
    fn zero_offset_ned(converter: Converter) {
        let mut rng = SmallRng::seed_from_u64(2);

        for _ in 0..100 {
            let lla0 = Vector3::new(
                rng.random_range(-1.5..1.5),
                rng.random_range(-3.14..3.14),
                rng.random_range(-500.0..1.0E4),
            );

            let ned = lla2ned(&lla0, &lla0);
            assert!(ned.norm() < 1.0E-3, "non zero offset: {}", ned);

            let x_e2n = converter.x_ecef2ned(&lla2ecef(&lla0)).unwrap();
            let ned = ecef2ned(&x_e2n, &lla2ecef(&lla0));
            assert!(ned.norm() < 1.0E-3, "non zero offset: {}", ned);
        }
    }

    #[rstest]
    fn ned_lla_roundtrip(converter: Converter) {
        let mut rng = SmallRng::seed_from_u64(3);

        for _ in 0..500 {
            let lla0 = Vector3::new(
                rng.random_range(-1.5..1.5),
                rng.random_range(-3.0..3.0),
                rng.random_range(-500.0..1.0E4),
            );

            let lla = Vector3::new(
                lla0[0] + rng.random_range(-0.05..0.05),
                lla0[1] + rng.random_range(-0.05..0.05),
                lla0[2] + rng.random_range(-100.0..1.0E3),
            );

            let ned = lla2ned(&lla0, &lla);
            let back = converter.ned2lla(&lla0, &ned).unwrap();
            assert_lla_eq(&back, &lla);
        }
    }

    #[rstest]
    fn ecef_ned_inverse(converter: Converter) {
        let mut rng = SmallRng::seed_from_u64(4);
        let origin = lla2ecef(&Vector3::new(0.83, 0.15, 150.0));
        let x_e2n = converter.x_ecef2ned(&origin).unwrap();

        for _ in 0..100 {
            let ecef = Vector3::new(
                rng.random_range(-2.0E7..2.0E7),
                rng.random_range(-2.0E7..2.0E7),
                rng.random_range(-2.0E7..2.0E7),
            );

            let ned = ecef2ned(&x_e2n, &ecef);
            // rigid transform: distances to the origin are preserved
            assert!(((ecef - origin).norm() - ned.norm()).abs() < 1.0E-6);

            let back = ned2ecef(&x_e2n, &ned);
            assert!((back - ecef).norm() < 1.0E-6, "{} {}", back, ecef);
        }
    }

    #[rstest]
    fn ecef_and_lla_poses_agree(converter: Converter) {
        let lla0 = Vector3::new(-0.6, 2.2, 420.0);
        let from_lla = x_lla2ned(&lla0);
        let from_ecef = converter.x_ecef2ned(&lla2ecef(&lla0)).unwrap();

        assert!((from_lla.translation.vector - from_ecef.translation.vector).norm() < 1.0E-9);
        assert!(from_lla.rotation.angle_to(&from_ecef.rotation) < 1.0E-8);
    }
}
