//! Score, lives, difficulty, and the running/over switch.

use bevy_ecs::{
    event::{Events, EventWriter},
    resource::Resource,
    system::ResMut,
};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::constants::{
    BASE_FALL_SPEED, BASE_SPAWN_INTERVAL_MS, FALL_SPEED_STEP, MIN_SPAWN_INTERVAL_MS, SCORE_PER_DIFFICULTY_STEP,
    SPAWN_INTERVAL_STEP_MS, STARTING_LIVES,
};
use crate::error::GameError;
use crate::events::GameEvent;
use crate::storage::StorageResource;
use crate::systems::components::{HighScore, ScoreResource};

/// Which half of the session lifecycle the simulation is in.
///
/// `GameOver` freezes the gameplay systems until an explicit restart.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
}

/// Remaining lives.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(STARTING_LIVES)
    }
}

/// The one-directional difficulty ratchet. Advances on score milestones,
/// resets only with the session.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Base downward speed handed to new fruit, in px/s.
    pub fall_speed: f32,
    /// Current spawner interval.
    pub spawn_interval_ms: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            fall_speed: BASE_FALL_SPEED,
            spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
        }
    }
}

impl Difficulty {
    /// One ratchet step: faster falls and a shorter spawn interval, floored
    /// so spawning never becomes instantaneous.
    pub fn advance(&mut self) {
        self.fall_speed += FALL_SPEED_STEP;
        self.spawn_interval_ms = self
            .spawn_interval_ms
            .saturating_sub(SPAWN_INTERVAL_STEP_MS)
            .max(MIN_SPAWN_INTERVAL_MS);
    }
}

/// Applies the tick's catch and miss consequences to score, lives, phase,
/// and the difficulty ratchet.
///
/// Score and lives mutate only here, so both stay atomic with respect to
/// the tick that produced the events. Reaching zero lives performs the
/// terminal transition exactly once: the high-score comparison and the
/// conditional persist happen inside it, and the rest of the tick's batch
/// is discarded so nothing mutates a frozen session.
///
/// Reads this tick's events straight off the buffer instead of through an
/// `EventReader` because it also emits `GameEvent::GameOver` into the same
/// channel.
pub fn state_system(
    mut events: ResMut<Events<GameEvent>>,
    mut errors: EventWriter<GameError>,
    mut score: ResMut<ScoreResource>,
    mut lives: ResMut<PlayerLives>,
    mut difficulty: ResMut<Difficulty>,
    mut phase: ResMut<GamePhase>,
    mut high_score: ResMut<HighScore>,
    mut store: ResMut<StorageResource>,
) {
    let batch: SmallVec<[GameEvent; 8]> = events.iter_current_update_events().copied().collect();

    for event in batch {
        match event {
            GameEvent::Caught { .. } => {
                score.0 += 1;
                if score.0 % SCORE_PER_DIFFICULTY_STEP == 0 {
                    difficulty.advance();
                    debug!(
                        score = score.0,
                        fall_speed = difficulty.fall_speed,
                        spawn_interval_ms = difficulty.spawn_interval_ms,
                        "Difficulty stepped up"
                    );
                }
            }
            GameEvent::BombContact => {
                lives.0 = lives.0.saturating_sub(1);
                debug!(lives = lives.0, "Bomb contact, life lost");
            }
            GameEvent::Missed { kind } if kind.is_fruit() => {
                lives.0 = lives.0.saturating_sub(1);
                debug!(lives = lives.0, "Fruit missed, life lost");
            }
            _ => {}
        }

        if lives.0 == 0 && matches!(*phase, GamePhase::Playing) {
            *phase = GamePhase::GameOver;

            let new_high_score = score.0 > high_score.0;
            if new_high_score {
                high_score.0 = score.0;
                if let Err(e) = store.0.set(score.0) {
                    warn!(error = %e, "Failed to persist high score");
                    errors.write(GameError::Storage(e));
                }
            }

            events.send(GameEvent::GameOver {
                score: score.0,
                new_high_score,
            });
            info!(score = score.0, new_high_score, "All lives lost, game over");
            break;
        }
    }
}
