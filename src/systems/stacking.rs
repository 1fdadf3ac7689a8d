//! Placement policy for fruit resting in the basket.
//!
//! Slots fill left to right, four per layer, each layer seated slightly
//! higher than the one below it. The slot grid is deterministic; only the
//! horizontal jitter and the tilt draw from the session RNG.

use glam::Vec2;
use rand::Rng;

use crate::constants::stacking;

/// Where a caught fruit sits, relative to the basket center. Fixed for the
/// fruit's resident lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackPlacement {
    pub offset: Vec2,
    pub layer: u8,
    pub rotation: f32,
}

/// Computes the placement for the `n`th resident, `n` being the count of
/// fruit already seated (0..=7).
pub fn stack_placement(n: usize, rng: &mut impl Rng) -> StackPlacement {
    debug_assert!(n < stacking::CAP);
    let layer = n / stacking::LAYER_SIZE;
    let slot = n % stacking::LAYER_SIZE;

    let jitter = rng.random_range(-stacking::SLOT_JITTER_X..=stacking::SLOT_JITTER_X);
    let offset = Vec2::new(
        stacking::SLOT_BASE_X + slot as f32 * stacking::SLOT_SPACING_X + jitter,
        stacking::LAYER_BASE_Y - layer as f32 * stacking::LAYER_RAISE_Y,
    );

    StackPlacement {
        offset,
        layer: layer as u8,
        rotation: rng.random_range(-stacking::ROTATION_JITTER..=stacking::ROTATION_JITTER),
    }
}
