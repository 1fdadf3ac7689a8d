//! This module contains all the tuning constants used by the simulation.

use std::time::Duration;

use glam::{UVec2, Vec2};

/// Duration of one host loop iteration at 60 Hz.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The default play field size, in pixels.
pub const DEFAULT_FIELD_SIZE: UVec2 = UVec2::new(800, 600);
/// Field width at which fall speeds are unscaled; wider fields fall faster.
pub const REFERENCE_FIELD_WIDTH: f32 = 1000.0;

/// Horizontal inset from each field edge when choosing a spawn position, in pixels.
pub const SPAWN_MARGIN: f32 = 80.0;
/// Vertical spawn position, above the visible field.
pub const SPAWN_Y: f32 = -50.0;

/// Downward speed of a freshly spawned fruit at base difficulty, in px/s.
pub const BASE_FALL_SPEED: f32 = 220.0;
/// Fall speed gained per difficulty step, in px/s.
pub const FALL_SPEED_STEP: f32 = 30.0;
/// Extra downward speed a bomb gets over a fruit spawned at the same moment, in px/s.
pub const BOMB_SPEED_BONUS: f32 = 80.0;

/// Time between spawner firings at base difficulty.
pub const BASE_SPAWN_INTERVAL_MS: u32 = 900;
/// Interval reduction per difficulty step.
pub const SPAWN_INTERVAL_STEP_MS: u32 = 40;
/// Shortest interval the ratchet may reach; spawning never becomes instantaneous.
pub const MIN_SPAWN_INTERVAL_MS: u32 = 350;

/// Bomb probability at score 0.
pub const BOMB_CHANCE_BASE: f32 = 0.15;
/// Bomb probability cap.
pub const BOMB_CHANCE_MAX: f32 = 0.45;
/// Score at which the bomb probability reaches its cap.
pub const BOMB_CHANCE_RAMP_SCORE: f32 = 150.0;

/// Number of catches between difficulty steps.
pub const SCORE_PER_DIFFICULTY_STEP: u32 = 5;

/// Lives a session starts with.
pub const STARTING_LIVES: u8 = 3;

/// Distance from the bottom edge up to the basket's center, in pixels.
pub const BASKET_SEAT_MARGIN: f32 = 80.0;
/// Vertical offset from the basket's center up to the catch region's center.
pub const CATCH_REGION_RAISE: f32 = 40.0;
/// Size of the catch region, in pixels. Independent of the basket's own bounds.
pub const CATCH_REGION_SIZE: Vec2 = Vec2::new(220.0, 50.0);

/// Collider edge lengths for falling entities, in pixels (square hitboxes).
pub mod collider {
    pub const FRUIT_SIZE: f32 = 60.0;
    pub const BOMB_SIZE: f32 = 50.0;
}

/// Placement values for fruit resting in the basket.
pub mod stacking {
    /// Most fruit the basket visually holds at once.
    pub const CAP: usize = 8;
    /// Fruit per visual layer before the next layer starts.
    pub const LAYER_SIZE: usize = 4;
    /// Horizontal offset of the first slot, relative to the basket center.
    pub const SLOT_BASE_X: f32 = -45.0;
    /// Horizontal distance between slots in a layer.
    pub const SLOT_SPACING_X: f32 = 30.0;
    /// Symmetric horizontal jitter applied to each slot.
    pub const SLOT_JITTER_X: f32 = 5.0;
    /// Vertical offset of the first layer, relative to the basket center.
    pub const LAYER_BASE_Y: f32 = -15.0;
    /// Each successive layer sits this much higher.
    pub const LAYER_RAISE_Y: f32 = 12.0;
    /// Symmetric tilt applied to each resting fruit, in radians.
    pub const ROTATION_JITTER: f32 = 0.2;
}
