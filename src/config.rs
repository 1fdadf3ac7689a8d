//! Session configuration supplied by the host at startup.

use glam::UVec2;

use crate::constants::DEFAULT_FIELD_SIZE;

/// Host-provided knobs for a new session.
///
/// The field size may change later via [`crate::session::Session::resize`];
/// this only sets the initial dimensions. A fixed `rng_seed` makes every
/// spawn decision and stacking jitter reproducible, which the scenario tests
/// rely on; leaving it `None` seeds from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Play field dimensions, in pixels.
    pub field: UVec2,
    /// Seed for the session's random source, or `None` for an OS seed.
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            field: DEFAULT_FIELD_SIZE,
            rng_seed: None,
        }
    }
}

impl SessionConfig {
    /// Config with a fixed seed and the default field, for deterministic runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::default()
        }
    }
}
