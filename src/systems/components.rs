use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;

use crate::constants::collider;
use crate::systems::stacking::StackPlacement;

/// A tag component for the catcher entity the player steers.
#[derive(Default, Component)]
pub struct Basket;

/// A tag component for entities still in flight.
#[derive(Default, Component)]
pub struct Falling;

/// A tag component denoting the kind of a falling entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Fruit(FruitKind),
    Bomb,
}

/// Cosmetic fruit variants. No gameplay difference between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitKind {
    Apple,
    Banana,
    Mango,
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::Apple, FruitKind::Banana, FruitKind::Mango];
}

impl EntityKind {
    /// Whether catching this entity scores (fruit) rather than wounds (bomb).
    pub fn is_fruit(&self) -> bool {
        matches!(self, EntityKind::Fruit(_))
    }

    /// Edge length of this kind's square hitbox.
    pub fn collider_size(&self) -> f32 {
        match self {
            EntityKind::Fruit(_) => collider::FRUIT_SIZE,
            EntityKind::Bomb => collider::BOMB_SIZE,
        }
    }
}

/// World-space position in field coordinates; y grows downward.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Downward speed in px/s; fixed at spawn.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub f32);

#[derive(Component)]
pub struct Collider {
    pub size: f32,
}

/// A caught fruit seated in the basket. The placement is fixed at catch
/// time; the entity's absolute position is re-derived from the basket every
/// tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct Resident(pub StackPlacement);

#[derive(Bundle)]
pub struct FallingBundle {
    pub kind: EntityKind,
    pub position: Position,
    pub velocity: Velocity,
    pub collider: Collider,
    pub falling: Falling,
}

#[derive(Bundle)]
pub struct BasketBundle {
    pub basket: Basket,
    pub position: Position,
}

#[derive(Resource)]
pub struct ScoreResource(pub u32);

#[derive(Resource)]
pub struct DeltaTime(pub f32);

/// Current play-field dimensions in pixels. Mutable at runtime (resize);
/// systems read it every use instead of caching.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FieldSize(pub Vec2);

/// Best score seen by this process, loaded from the store once at session
/// construction. Survives restarts.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HighScore(pub u32);

/// The session's single random source. Seeded from config so tests can
/// replay exact spawn and placement sequences.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);
