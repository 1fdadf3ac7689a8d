//! Session orchestration: one `World` plus one `Schedule` per game.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::{Or, With};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::constants::BASKET_SEAT_MARGIN;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::storage::{HighScoreStore, StorageResource};
use crate::systems::{
    carry_system, catch_system, miss_system, movement_system, spawn_system, state_system, Basket, BasketBundle,
    DeltaTime, Difficulty, Falling, FieldSize, GamePhase, GameRng, HighScore, PlayerLives, Position, Resident,
    ScoreResource, SpawnTimer,
};

/// System sets splitting each tick into the world update and the state
/// machine's response to the events it produced.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum SimSet {
    /// Spawning, motion, miss eviction, catch resolution, resident carry.
    Update,
    /// Score/lives/phase reactions to this tick's events.
    Respond,
}

/// One running game: entities, resources, and the tick pipeline.
///
/// Owns the ECS `World` (entity sets plus all session state as resources)
/// and the `Schedule` that enforces per-tick system order. Hosts drive it
/// with [`Session::tick`] at whatever cadence they like and feed inputs in
/// through the setter methods; simulation output comes back as drained
/// [`GameEvent`]s.
pub struct Session {
    pub world: World,
    pub schedule: Schedule,
}

impl Session {
    /// Builds a fresh session in the `Playing` phase.
    ///
    /// Registers event channels, loads the stored high score (defaulting to
    /// 0 if the store cannot produce one), inserts every session resource,
    /// wires the system schedule, and seats the basket at the bottom center
    /// of the field.
    pub fn new(config: SessionConfig, store: Box<dyn HighScoreStore>) -> Session {
        info!(field = ?config.field, seeded = config.rng_seed.is_some(), "Starting session");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, &config, store);
        Self::configure_schedule(&mut schedule);

        world.spawn(BasketBundle {
            basket: Basket,
            position: Position(Self::basket_seat(config.field.as_vec2())),
        });

        debug!("Session initialization complete");
        Session { world, schedule }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<GameError>(world);
    }

    fn insert_resources(world: &mut World, config: &SessionConfig, store: Box<dyn HighScoreStore>) {
        let high_score = store.get().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read stored high score, defaulting to 0");
            0
        });
        debug!(high_score, "Loaded high score");

        let rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        world.insert_resource(FieldSize(config.field.as_vec2()));
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(ScoreResource(0));
        world.insert_resource(PlayerLives::default());
        world.insert_resource(Difficulty::default());
        world.insert_resource(GamePhase::default());
        world.insert_resource(SpawnTimer::default());
        world.insert_resource(HighScore(high_score));
        world.insert_resource(GameRng(rng));
        world.insert_resource(StorageResource(store));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (spawn_system, movement_system, miss_system, catch_system, carry_system)
                    .chain()
                    .in_set(SimSet::Update),
                state_system.in_set(SimSet::Respond),
            ))
            .configure_sets(
                (
                    SimSet::Update.run_if(|phase: Res<GamePhase>| matches!(*phase, GamePhase::Playing)),
                    SimSet::Respond.run_if(|phase: Res<GamePhase>| matches!(*phase, GamePhase::Playing)),
                )
                    .chain(),
            );
    }

    fn basket_seat(field: Vec2) -> Vec2 {
        Vec2::new(field.x / 2.0, field.y - BASKET_SEAT_MARGIN)
    }

    fn place_basket(&mut self, seat: Vec2) {
        let mut basket = self.world.query_filtered::<&mut Position, With<Basket>>();
        match basket.single_mut(&mut self.world) {
            Ok(mut position) => position.0 = seat,
            Err(e) => {
                self.world
                    .resource_mut::<Events<GameError>>()
                    .send(GameError::InvalidState(format!("No/multiple basket entities to seat: {}", e)));
            }
        }
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Rotates the event double-buffers first (events undrained for two
    /// ticks are dropped), then runs the full system pipeline. While the
    /// phase is `GameOver` the gameplay sets are skipped, so ticking a dead
    /// session is a cheap no-op until [`Session::restart`].
    pub fn tick(&mut self, dt: f32) {
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<GameError>>().update();

        self.world.insert_resource(DeltaTime(dt));
        self.schedule.run(&mut self.world);
    }

    /// Moves the basket to horizontal position `x`, clamped to field bounds.
    /// Ignored while the session is over.
    pub fn set_catcher_x(&mut self, x: f32) {
        if matches!(*self.world.resource::<GamePhase>(), GamePhase::GameOver) {
            return;
        }

        let width = self.world.resource::<FieldSize>().0.x;
        let clamped = x.clamp(0.0, width);

        let mut basket = self.world.query_filtered::<&mut Position, With<Basket>>();
        match basket.single_mut(&mut self.world) {
            Ok(mut position) => position.0.x = clamped,
            Err(e) => {
                self.world
                    .resource_mut::<Events<GameError>>()
                    .send(GameError::InvalidState(format!("No/multiple basket entities to steer: {}", e)));
            }
        }
    }

    /// Updates the play-field dimensions.
    ///
    /// The basket recenters and re-seats at the new bottom margin; resident
    /// fruit follow it on the next carry pass. Spawn positions and the miss
    /// boundary pick up the new dimensions on their next read.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "Play field resized");
        let field = Vec2::new(width as f32, height as f32);
        self.world.insert_resource(FieldSize(field));
        self.place_basket(Self::basket_seat(field));
    }

    /// Resets the session to a fresh `Playing` state.
    ///
    /// Clears both entity sets, restores score/lives/difficulty to their
    /// starting values, re-arms the spawn timer from a full base interval,
    /// and drops every queued event from the dead session before announcing
    /// `Restarted`. The in-memory high score survives without a store
    /// re-read. Callable from either phase.
    pub fn restart(&mut self) {
        info!(final_score = self.world.resource::<ScoreResource>().0, "Restarting session");

        let mut doomed = self.world.query_filtered::<Entity, Or<(With<Falling>, With<Resident>)>>();
        let doomed: SmallVec<[Entity; 16]> = doomed.iter(&self.world).collect();
        for entity in doomed {
            self.world.despawn(entity);
        }

        self.world.insert_resource(ScoreResource(0));
        self.world.insert_resource(PlayerLives::default());
        self.world.insert_resource(Difficulty::default());
        self.world.insert_resource(SpawnTimer::default());
        self.world.insert_resource(GamePhase::Playing);

        self.world.resource_mut::<Events<GameError>>().clear();
        let mut events = self.world.resource_mut::<Events<GameEvent>>();
        events.clear();
        events.send(GameEvent::Restarted);

        let field = self.world.resource::<FieldSize>().0;
        self.place_basket(Self::basket_seat(field));
    }

    /// Hands every pending simulation event to the host, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.resource_mut::<Events<GameEvent>>().drain().collect()
    }

    /// Hands every pending error (storage failures and the like) to the host.
    pub fn drain_errors(&mut self) -> Vec<GameError> {
        self.world.resource_mut::<Events<GameError>>().drain().collect()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn lives(&self) -> u8 {
        self.world.resource::<PlayerLives>().0
    }

    pub fn phase(&self) -> GamePhase {
        *self.world.resource::<GamePhase>()
    }

    pub fn high_score(&self) -> u32 {
        self.world.resource::<HighScore>().0
    }

    /// Consumes the session, logging its final standing.
    pub fn teardown(self) {
        info!(
            score = self.world.resource::<ScoreResource>().0,
            high_score = self.world.resource::<HighScore>().0,
            "Session torn down"
        );
    }
}
