use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Commands, Res, ResMut},
};
use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::constants::{
    BASE_SPAWN_INTERVAL_MS, BOMB_CHANCE_BASE, BOMB_CHANCE_MAX, BOMB_CHANCE_RAMP_SCORE, BOMB_SPEED_BONUS,
    REFERENCE_FIELD_WIDTH, SPAWN_MARGIN, SPAWN_Y,
};
use crate::events::GameEvent;
use crate::systems::components::{
    Collider, DeltaTime, EntityKind, Falling, FallingBundle, FieldSize, FruitKind, GameRng, Position, ScoreResource,
    Velocity,
};
use crate::systems::state::Difficulty;

/// Countdown until the spawner's next firing, in seconds.
///
/// The re-arm interval is read from [`Difficulty`] at every firing, so the
/// ratchet takes effect on the very next spawn rather than a cached cycle.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    pub remaining: f32,
}

impl SpawnTimer {
    /// A timer that waits out one full `interval_ms` before its first firing.
    pub fn armed(interval_ms: u32) -> Self {
        Self {
            remaining: interval_ms as f32 / 1000.0,
        }
    }
}

impl Default for SpawnTimer {
    fn default() -> Self {
        Self::armed(BASE_SPAWN_INTERVAL_MS)
    }
}

/// Probability that the next spawn is a bomb.
///
/// Rises linearly with score from 15% to a 45% cap reached at score 150.
pub fn bomb_probability(score: u32) -> f32 {
    (BOMB_CHANCE_BASE + score as f32 / BOMB_CHANCE_RAMP_SCORE * (BOMB_CHANCE_MAX - BOMB_CHANCE_BASE))
        .clamp(BOMB_CHANCE_BASE, BOMB_CHANCE_MAX)
}

/// Downward speed for a newly spawned entity.
///
/// Fields wider than the reference width scale speeds up proportionally so
/// travel time stays comparable across devices; bombs always outpace fruit
/// spawned at the same moment.
pub fn fall_velocity(kind: EntityKind, base_speed: f32, field_width: f32) -> f32 {
    let speed = base_speed * (field_width / REFERENCE_FIELD_WIDTH).max(1.0);
    match kind {
        EntityKind::Bomb => speed + BOMB_SPEED_BONUS,
        EntityKind::Fruit(_) => speed,
    }
}

/// Horizontal spawn position, uniformly drawn inside the edge insets.
/// Fields too narrow for both insets fall back to the centerline.
pub fn spawn_x(field_width: f32, rng: &mut impl Rng) -> f32 {
    if field_width > SPAWN_MARGIN * 2.0 {
        rng.random_range(SPAWN_MARGIN..=field_width - SPAWN_MARGIN)
    } else {
        field_width * 0.5
    }
}

/// Creates falling entities whenever the spawn timer elapses.
///
/// A long `dt` spanning several intervals produces several entities, so the
/// spawner never silently drops a firing. Each firing rolls the bomb/fruit
/// decision against the score-driven probability, picks a cosmetic fruit
/// kind, and registers the entity above the visible field.
pub fn spawn_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    field: Res<FieldSize>,
    difficulty: Res<Difficulty>,
    score: Res<ScoreResource>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<GameRng>,
    mut events: EventWriter<GameEvent>,
) {
    timer.remaining -= dt.0;

    while timer.remaining <= 0.0 {
        timer.remaining += difficulty.spawn_interval_ms as f32 / 1000.0;

        let kind = if rng.0.random::<f32>() < bomb_probability(score.0) {
            EntityKind::Bomb
        } else {
            EntityKind::Fruit(FruitKind::ALL[rng.0.random_range(0..FruitKind::ALL.len())])
        };

        let position = Vec2::new(spawn_x(field.0.x, &mut rng.0), SPAWN_Y);
        let velocity = fall_velocity(kind, difficulty.fall_speed, field.0.x);

        let entity = commands
            .spawn(FallingBundle {
                kind,
                position: Position(position),
                velocity: Velocity(velocity),
                collider: Collider {
                    size: kind.collider_size(),
                },
                falling: Falling,
            })
            .id();

        events.write(GameEvent::Spawned { entity, kind });
        debug!(?kind, x = position.x, velocity, "Spawned falling entity");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bomb_probability_endpoints() {
        assert_eq!(bomb_probability(0), 0.15);
        assert_eq!(bomb_probability(150), 0.45);
        assert_eq!(bomb_probability(300), 0.45);
    }

    #[test]
    fn test_bomb_probability_monotonic() {
        let mut last = 0.0;
        for score in 0..400 {
            let p = bomb_probability(score);
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn test_fall_velocity_scales_with_width() {
        let fruit = EntityKind::Fruit(FruitKind::Apple);

        // At or below the reference width the base speed passes through.
        assert_eq!(fall_velocity(fruit, 220.0, 800.0), 220.0);
        assert_eq!(fall_velocity(fruit, 220.0, 1000.0), 220.0);

        // Wider fields scale proportionally.
        assert_eq!(fall_velocity(fruit, 220.0, 2000.0), 440.0);
    }

    #[test]
    fn test_bombs_outpace_fruit() {
        let fruit = EntityKind::Fruit(FruitKind::Mango);
        let delta = fall_velocity(EntityKind::Bomb, 220.0, 800.0) - fall_velocity(fruit, 220.0, 800.0);
        assert_eq!(delta, BOMB_SPEED_BONUS);
    }
}
