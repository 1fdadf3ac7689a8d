use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    system::{Commands, Query, Res},
};
use tracing::trace;

use crate::error::GameError;
use crate::events::GameEvent;
use crate::systems::components::{Basket, DeltaTime, EntityKind, Falling, FieldSize, Position, Resident, Velocity};

/// Advances every falling entity by its constant downward velocity.
pub fn movement_system(dt: Res<DeltaTime>, mut query: Query<(&mut Position, &Velocity), With<Falling>>) {
    for (mut position, velocity) in query.iter_mut() {
        position.0.y += velocity.0 * dt.0;
    }
}

/// Evicts entities that fell past the bottom edge.
///
/// The edge is the field's current height, re-read every tick so a resize
/// takes effect immediately. A missed fruit is a penalty the state machine
/// charges a life for; a missed bomb despawns quietly.
pub fn miss_system(
    mut commands: Commands,
    field: Res<FieldSize>,
    query: Query<(Entity, &Position, &EntityKind), With<Falling>>,
    mut events: EventWriter<GameEvent>,
) {
    for (entity, position, kind) in query.iter() {
        if position.0.y > field.0.y {
            commands.entity(entity).despawn();
            events.write(GameEvent::Missed { kind: *kind });
            trace!(?kind, y = position.0.y, "Entity fell past the bottom edge");
        }
    }
}

/// Keeps seated fruit glued to the basket as it moves.
pub fn carry_system(
    basket: Query<&Position, (With<Basket>, Without<Resident>)>,
    mut residents: Query<(&mut Position, &Resident), Without<Basket>>,
    mut errors: EventWriter<GameError>,
) {
    let origin = match basket.single() {
        Ok(position) => position.0,
        Err(e) => {
            errors.write(GameError::InvalidState(format!("No/multiple basket entities for carry system: {}", e)));
            return;
        }
    };

    for (mut position, resident) in residents.iter_mut() {
        position.0 = origin + resident.0.offset;
    }
}
