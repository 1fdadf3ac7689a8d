use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::With,
    system::{Commands, Query, ResMut},
};
use glam::Vec2;
use tracing::debug;

use crate::constants::{stacking, CATCH_REGION_RAISE, CATCH_REGION_SIZE};
use crate::error::GameError;
use crate::events::GameEvent;
use crate::systems::components::{Basket, Collider, EntityKind, Falling, GameRng, Position, Resident, Velocity};
use crate::systems::stacking::stack_placement;

/// Helper function to check overlap between two axis-aligned boxes given by
/// center and size.
pub fn check_collision(center_a: Vec2, size_a: Vec2, center_b: Vec2, size_b: Vec2) -> bool {
    let half = (size_a + size_b) * 0.5;
    let delta = (center_a - center_b).abs();
    delta.x <= half.x && delta.y <= half.y
}

/// Resolves falling entities overlapping the catch region.
///
/// The region rides above the basket center and is deliberately wider than
/// the basket itself. Fruit transfer into the basket until the stacking cap
/// fills; past the cap the fruit is destroyed but the catch still scores.
/// Bombs are destroyed and the contact reported for the state machine to
/// charge. Each entity resolves at most once: the structural commands queued
/// here are applied before any later system sees the falling set, and the
/// local `seated` count covers several fruit landing in one tick.
pub fn catch_system(
    mut commands: Commands,
    basket: Query<&Position, With<Basket>>,
    falling: Query<(Entity, &Position, &Collider, &EntityKind), With<Falling>>,
    residents: Query<(), With<Resident>>,
    mut rng: ResMut<GameRng>,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    let basket_position = match basket.single() {
        Ok(position) => position,
        Err(e) => {
            errors.write(GameError::InvalidState(format!("No/multiple basket entities for catch system: {}", e)));
            return;
        }
    };
    let region_center = basket_position.0 - Vec2::new(0.0, CATCH_REGION_RAISE);

    let mut seated = residents.iter().count();

    for (entity, position, collider, kind) in falling.iter() {
        if !check_collision(region_center, CATCH_REGION_SIZE, position.0, Vec2::splat(collider.size)) {
            continue;
        }

        match kind {
            EntityKind::Fruit(_) => {
                let placement = if seated < stacking::CAP {
                    let placement = stack_placement(seated, &mut rng.0);
                    commands
                        .entity(entity)
                        .remove::<(Falling, Velocity)>()
                        .insert(Resident(placement));
                    seated += 1;
                    Some(placement)
                } else {
                    commands.entity(entity).despawn();
                    None
                };

                events.write(GameEvent::Caught { entity, placement });
                debug!(?kind, seated, overflowed = placement.is_none(), "Caught fruit");
            }
            EntityKind::Bomb => {
                commands.entity(entity).despawn();
                events.write(GameEvent::BombContact);
                debug!("Bomb contact on catch region");
            }
        }
    }
}
