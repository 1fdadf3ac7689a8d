//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic: components, resources,
//! and the per-tick simulation systems.

pub mod catch;
pub mod components;
pub mod movement;
pub mod spawn;
pub mod stacking;
pub mod state;

pub use catch::{catch_system, check_collision};
pub use components::{
    Basket, BasketBundle, Collider, DeltaTime, EntityKind, Falling, FallingBundle, FieldSize, FruitKind, GameRng,
    HighScore, Position, Resident, ScoreResource, Velocity,
};
pub use movement::{carry_system, miss_system, movement_system};
pub use spawn::{bomb_probability, fall_velocity, spawn_system, spawn_x, SpawnTimer};
pub use stacking::{stack_placement, StackPlacement};
pub use state::{state_system, Difficulty, GamePhase, PlayerLives};
