//! Preset scenario definitions.

use glam::DVec2;

use crate::diagnostics::{AngularMomentumModel, DriftOptions, PerihelionRule};
use crate::physics::{IntegrationScheme, OrbitConfig, TerminationPolicy};
use crate::types::AU_TO_METERS;

use super::Scenario;

/// All available preset scenarios. The first one is the default.
pub static SCENARIOS: &[Scenario] = &[
    FIRST_LAW,
    SECOND_LAW,
    PRECISION,
    EARTH_ORBIT,
    DRIFT_STUDY,
    EXPLICIT_DRIFT,
];

const PROXY_DRIFT: DriftOptions = DriftOptions {
    angular_momentum: AngularMomentumModel::MagnitudeProduct,
    perihelion: PerihelionRule::OddAxisCrossings,
};

/// One revolution of the eccentric Earth-like orbit at one-hour steps.
///
/// Closes after roughly 4 700 steps; the focal-distance sum stays within
/// about 1e-6 of its midpoint.
pub static FIRST_LAW: Scenario = Scenario {
    id: "first_law",
    name: "Kepler I",
    description: "One revolution at dt = 1 h. Focal-distance sum is constant.",
    config: OrbitConfig::EARTH_LIKE,
    drift: PROXY_DRIFT,
};

/// The same orbit at six-minute steps, resolving the swept triangles finely.
pub static SECOND_LAW: Scenario = Scenario {
    id: "second_law",
    name: "Kepler II",
    description: "One revolution at dt = 6 min. Equal areas in equal times.",
    config: OrbitConfig {
        dt: 360.0,
        ..OrbitConfig::EARTH_LIKE
    },
    drift: PROXY_DRIFT,
};

/// Spend the whole iteration budget at 36 s steps (just over one revolution).
pub static PRECISION: Scenario = Scenario {
    id: "precision",
    name: "Precision run",
    description: "500 000 steps of 36 s without a closure test.",
    config: OrbitConfig {
        dt: 36.0,
        termination: TerminationPolicy::FixedSteps,
        ..OrbitConfig::EARTH_LIKE
    },
    drift: PROXY_DRIFT,
};

/// Earth released at aphelion with its real aphelion speed.
pub static EARTH_ORBIT: Scenario = Scenario {
    id: "earth_orbit",
    name: "Earth orbit",
    description: "Earth from aphelion at 29.29 km/s. Nearly circular.",
    config: OrbitConfig {
        initial_position: DVec2::new(-1.0167 * AU_TO_METERS, 0.0),
        initial_velocity: DVec2::new(0.0, 29_290.0),
        ..OrbitConfig::EARTH_LIKE
    },
    drift: PROXY_DRIFT,
};

/// Ten revolutions with the exact angular momentum, to watch for secular drift.
pub static DRIFT_STUDY: Scenario = Scenario {
    id: "drift_study",
    name: "Drift study",
    description: "Ten revolutions. Energy stays bounded and perihelia stay put.",
    config: OrbitConfig {
        termination: TerminationPolicy::revolutions(10),
        ..OrbitConfig::EARTH_LIKE
    },
    drift: DriftOptions {
        angular_momentum: AngularMomentumModel::CrossProduct,
        perihelion: PerihelionRule::OddAxisCrossings,
    },
};

/// The drift study with explicit Euler, which gains energy every revolution.
pub static EXPLICIT_DRIFT: Scenario = Scenario {
    id: "explicit_drift",
    name: "Explicit Euler drift",
    description: "Ten revolutions with explicit Euler. The orbit spirals outward.",
    config: OrbitConfig {
        termination: TerminationPolicy::revolutions(10),
        scheme: IntegrationScheme::ExplicitEuler,
        ..OrbitConfig::EARTH_LIKE
    },
    drift: DriftOptions {
        angular_momentum: AngularMomentumModel::CrossProduct,
        perihelion: PerihelionRule::OddAxisCrossings,
    },
};
