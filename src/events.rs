use bevy_ecs::prelude::*;

use crate::systems::{EntityKind, StackPlacement};

/// Everything the simulation announces, both to its own systems and to the
/// host. Hosts drain these after each tick; undrained events are dropped by
/// the double buffer after two ticks.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// A new entity entered the falling set.
    Spawned { entity: Entity, kind: EntityKind },
    /// A fruit overlapped the catch region. `placement` is `None` when the
    /// basket was already full and the fruit was destroyed instead of
    /// seated; the catch still scores either way.
    Caught {
        entity: Entity,
        placement: Option<StackPlacement>,
    },
    /// A bomb overlapped the catch region. Doubles as the feedback-pulse
    /// signal for presentation.
    BombContact,
    /// An entity fell past the bottom edge.
    Missed { kind: EntityKind },
    /// Terminal transition; `new_high_score` reports whether the store was
    /// asked to persist `score`.
    GameOver { score: u32, new_high_score: bool },
    /// The session was reset to its initial state.
    Restarted,
}
