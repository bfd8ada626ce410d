//! Named run configurations.
//!
//! Each scenario pairs an [`OrbitConfig`] with the drift options used to
//! analyse it. They cover the first-law and second-law checks at their usual
//! step sizes, a fixed-budget precision run, a realistic Earth orbit and
//! multi-revolution drift studies.

pub mod presets;

use crate::diagnostics::DriftOptions;
use crate::physics::OrbitConfig;

pub use presets::SCENARIOS;

/// A predefined run.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Unique identifier, used on the command line.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description of what the run demonstrates.
    pub description: &'static str,
    pub config: OrbitConfig,
    pub drift: DriftOptions,
}

/// Look up a scenario by id.
pub fn find(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}
