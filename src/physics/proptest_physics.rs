//! Property-based tests for the integrator and the Kepler-law checks.
//!
//! These tests verify physical invariants across a wide range of orbital
//! parameters, each orbit resolved with the same number of steps.

use glam::DVec2;
use proptest::prelude::*;

use crate::analysis::{heron_area, AreaSweepAnalyzer, FocalDistanceAnalyzer, Sampling};
use crate::diagnostics::{AngularMomentumModel, DriftOptions, DriftSeries};
use crate::physics::{step, RunStatus, TerminationPolicy};
use crate::test_utils::{assertions, fixtures};
use crate::trajectory::Trajectory;
use crate::types::{StateVector, AU_TO_METERS, G, SUN_MASS};

const STEPS_PER_ORBIT: f64 = 5000.0;

fn one_revolution(perihelion_au: f64, eccentricity: f64) -> Trajectory {
    let config = crate::physics::OrbitConfig {
        termination: TerminationPolicy::revolutions(1),
        ..fixtures::resolved(
            fixtures::elliptical_orbit(perihelion_au, eccentricity),
            STEPS_PER_ORBIT,
        )
    };
    Trajectory::simulate(&config).expect("fixture orbit integrates")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The focal-distance sum stays constant and the second focus lands
    /// `2ae` from the primary.
    #[test]
    fn prop_first_law_holds(
        perihelion_au in 0.3f64..5.0,
        eccentricity in 0.0f64..0.7,
    ) {
        let traj = one_revolution(perihelion_au, eccentricity);
        prop_assert_eq!(traj.status(), RunStatus::Closed);

        let analyzer = FocalDistanceAnalyzer::new(&traj);
        let report = analyzer.report(&Sampling::default()).unwrap();
        prop_assert!(
            report.relative_deviation < 1e-5,
            "focal deviation {:e} (e={}, r_p={} AU)",
            report.relative_deviation, eccentricity, perihelion_au
        );

        let a = perihelion_au * AU_TO_METERS / (1.0 - eccentricity);
        let separation = analyzer.foci().separation();
        prop_assert!(
            (separation - 2.0 * a * eccentricity).abs() < 2e-3 * a,
            "focus separation {:e} m, expected {:e} m",
            separation, 2.0 * a * eccentricity
        );
        prop_assert!((report.midpoint() - 2.0 * a).abs() < 1e-3 * a);
    }

    /// Equal areas in equal times.
    #[test]
    fn prop_second_law_holds(
        perihelion_au in 0.3f64..5.0,
        eccentricity in 0.0f64..0.7,
    ) {
        let traj = one_revolution(perihelion_au, eccentricity);
        let report = AreaSweepAnalyzer::new(&traj).report(&Sampling::default()).unwrap();
        prop_assert!(
            report.relative_deviation < 1e-9,
            "area deviation {:e} (e={}, r_p={} AU)",
            report.relative_deviation, eccentricity, perihelion_au
        );
    }

    /// Energy returns after one revolution and the exact angular momentum
    /// never moves.
    #[test]
    fn prop_conserved_over_one_orbit(
        perihelion_au in 0.3f64..5.0,
        eccentricity in 0.0f64..0.7,
    ) {
        let config = fixtures::resolved(
            fixtures::elliptical_orbit(perihelion_au, eccentricity),
            STEPS_PER_ORBIT,
        );
        let config = crate::physics::OrbitConfig {
            termination: TerminationPolicy::revolutions(1),
            ..config
        };
        let options = DriftOptions {
            angular_momentum: AngularMomentumModel::CrossProduct,
            ..Default::default()
        };
        let (series, _) = DriftSeries::stream(&config, &options).unwrap();

        let first_e = series.mechanical_energy[0];
        let last_e = *series.mechanical_energy.last().unwrap();
        assertions::assert_energy_conserved(first_e, last_e, 1e-3);

        let first_l = series.angular_momentum[0];
        let last_l = *series.angular_momentum.last().unwrap();
        assertions::assert_angular_momentum_conserved(first_l, last_l, 1e-10);
    }

    /// The magnitude-product proxy never undercuts the true angular momentum.
    #[test]
    fn prop_proxy_bounds_angular_momentum(
        x in -1e12f64..1e12,
        y in -1e12f64..1e12,
        vx in -1e5f64..1e5,
        vy in -1e5f64..1e5,
    ) {
        let state = StateVector::new(0.0, DVec2::new(x, y), DVec2::new(vx, vy));
        let proxy = AngularMomentumModel::MagnitudeProduct.evaluate(&state, 1.0);
        let exact = AngularMomentumModel::CrossProduct.evaluate(&state, 1.0).abs();
        prop_assert!(proxy >= exact * (1.0 - 1e-12));
        prop_assert!(
            (assertions::angular_momentum(state.pos, state.vel).abs() - exact).abs()
                <= 1e-12 * exact.max(1.0)
        );
    }

    /// A step advances time by exactly `dt` and depends only on its input.
    #[test]
    fn prop_step_is_deterministic(
        distance_au in 0.1f64..30.0,
        speed in 1e3f64..6e4,
        dt in 1.0f64..86_400.0,
    ) {
        let state = StateVector::new(
            1000.0,
            DVec2::new(distance_au * AU_TO_METERS, 0.0),
            DVec2::new(0.0, speed),
        );
        let a = step(&state, dt, SUN_MASS, G).unwrap();
        let b = step(&state, dt, SUN_MASS, G).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.time, 1000.0 + dt);
    }

    /// Heron's formula never returns a negative or NaN area.
    #[test]
    fn prop_heron_area_non_negative(
        ax in -1e12f64..1e12, ay in -1e12f64..1e12,
        bx in -1e12f64..1e12, by in -1e12f64..1e12,
    ) {
        let area = heron_area(DVec2::new(ax, ay), DVec2::new(bx, by), DVec2::ZERO);
        prop_assert!(area >= 0.0);
        prop_assert!(area.is_finite());
    }

    /// Every fraction in `[0, 100)` maps to a valid index.
    #[test]
    fn prop_fraction_index_in_bounds(
        len in 1usize..10_000,
        fraction in 0.0f64..99.9,
    ) {
        let states = (0..len)
            .map(|i| StateVector { time: i as f64, ..Default::default() })
            .collect();
        let traj = Trajectory::from_samples(states, RunStatus::Closed, 0).unwrap();
        let index = traj.index_at(fraction).unwrap();
        prop_assert!(index < len);
        prop_assert_eq!(index, (len as f64 * fraction / 100.0).floor() as usize);
    }
}
