//! Fruit-catching arcade game simulation library crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod session;
pub mod storage;
pub mod systems;
