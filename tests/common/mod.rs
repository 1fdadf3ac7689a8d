#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bevy_ecs::{entity::Entity, event::Events, world::World};
use fruitfall::{
    config::SessionConfig,
    constants::BASKET_SEAT_MARGIN,
    error::{GameError, StorageError},
    events::GameEvent,
    session::Session,
    storage::{HighScoreStore, MemoryStore, StorageResource},
    systems::{
        Basket, Collider, DeltaTime, Difficulty, EntityKind, Falling, FieldSize, GamePhase, GameRng, HighScore,
        PlayerLives, Position, ScoreResource, SpawnTimer, Velocity,
    },
};
use glam::Vec2;
use rand::{rngs::SmallRng, SeedableRng};

pub const TEST_FIELD: Vec2 = Vec2::new(800.0, 600.0);

/// Creates a world carrying every resource the gameplay systems read.
pub fn create_test_world() -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(ScoreResource(0));
    world.insert_resource(PlayerLives::default());
    world.insert_resource(Difficulty::default());
    world.insert_resource(GamePhase::default());
    world.insert_resource(SpawnTimer::default());
    world.insert_resource(HighScore(0));
    world.insert_resource(FieldSize(TEST_FIELD));
    world.insert_resource(DeltaTime(1.0 / 60.0));
    world.insert_resource(GameRng(SmallRng::seed_from_u64(7)));
    world.insert_resource(StorageResource(Box::new(MemoryStore::default())));

    world
}

/// A deterministic session over the default field and an in-memory store.
pub fn create_test_session() -> Session {
    Session::new(SessionConfig::seeded(7), Box::new(MemoryStore::default()))
}

pub fn create_test_session_with_store(store: impl HighScoreStore + 'static) -> Session {
    Session::new(SessionConfig::seeded(7), Box::new(store))
}

/// Spawns the basket at its usual seat on the test field.
pub fn spawn_test_basket(world: &mut World) -> Entity {
    world
        .spawn((
            Basket,
            Position(Vec2::new(TEST_FIELD.x / 2.0, TEST_FIELD.y - BASKET_SEAT_MARGIN)),
        ))
        .id()
}

/// Spawns a falling entity of `kind` at `position` with a gentle fall.
pub fn spawn_test_falling(world: &mut World, kind: EntityKind, position: Vec2) -> Entity {
    world
        .spawn((
            kind,
            Position(position),
            Velocity(100.0),
            Collider {
                size: kind.collider_size(),
            },
            Falling,
        ))
        .id()
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    world.resource_mut::<Events<GameEvent>>().send(event);
}

pub fn drain_game_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

pub fn drain_game_errors(world: &mut World) -> Vec<GameError> {
    world.resource_mut::<Events<GameError>>().drain().collect()
}

pub fn count_falling(world: &mut World) -> usize {
    world.query::<&Falling>().iter(world).count()
}

/// Store that records every write, so tests can assert on what was
/// persisted and how often.
#[derive(Clone, Default)]
pub struct RecordingStore {
    stored: Arc<Mutex<u32>>,
    writes: Arc<Mutex<u32>>,
}

impl RecordingStore {
    pub fn with_score(score: u32) -> Self {
        let store = Self::default();
        *store.stored.lock().unwrap() = score;
        store
    }

    pub fn stored(&self) -> u32 {
        *self.stored.lock().unwrap()
    }

    pub fn writes(&self) -> u32 {
        *self.writes.lock().unwrap()
    }
}

impl HighScoreStore for RecordingStore {
    fn get(&self) -> Result<u32, StorageError> {
        Ok(*self.stored.lock().unwrap())
    }

    fn set(&mut self, score: u32) -> Result<(), StorageError> {
        *self.stored.lock().unwrap() = score;
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

/// Store whose writes always fail, for exercising the error channel.
pub struct ReadOnlyStore;

impl HighScoreStore for ReadOnlyStore {
    fn get(&self) -> Result<u32, StorageError> {
        Ok(0)
    }

    fn set(&mut self, _score: u32) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "store is read-only",
        )))
    }
}
