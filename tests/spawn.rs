use bevy_ecs::query::With;
use bevy_ecs::system::RunSystemOnce;
use fruitfall::constants::{SPAWN_MARGIN, SPAWN_Y};
use fruitfall::events::GameEvent;
use fruitfall::systems::{spawn_system, DeltaTime, Difficulty, EntityKind, Falling, FieldSize, Position, Velocity};
use glam::Vec2;
use speculoos::prelude::*;

mod common;

#[test]
fn test_no_spawn_before_interval_elapses() {
    let mut world = common::create_test_world();
    world.insert_resource(DeltaTime(0.1));

    world.run_system_once(spawn_system).expect("System should run");

    assert_that(&common::count_falling(&mut world)).is_equal_to(0);
    assert_that(&common::drain_game_events(&mut world)).is_equal_to(Vec::new());
}

#[test]
fn test_spawn_fires_once_interval_elapses() {
    let mut world = common::create_test_world();
    world.insert_resource(DeltaTime(1.0));

    world.run_system_once(spawn_system).expect("System should run");

    assert_that(&common::count_falling(&mut world)).is_equal_to(1);

    let events = common::drain_game_events(&mut world);
    assert_that(&events.len()).is_equal_to(1);
    assert_that(&matches!(events[0], GameEvent::Spawned { .. })).is_true();
}

#[test]
fn test_long_tick_catches_up_with_multiple_spawns() {
    let mut world = common::create_test_world();
    // 2.0s against a 0.9s interval spans two firings.
    world.insert_resource(DeltaTime(2.0));

    world.run_system_once(spawn_system).expect("System should run");

    assert_that(&common::count_falling(&mut world)).is_equal_to(2);
}

#[test]
fn test_spawns_start_above_field_within_margins() {
    let mut world = common::create_test_world();

    // Accumulate a few dozen spawns.
    for _ in 0..30 {
        world.insert_resource(DeltaTime(1.0));
        world.run_system_once(spawn_system).expect("System should run");
    }

    let mut query = world.query_filtered::<&Position, With<Falling>>();
    let mut seen = 0;
    for position in query.iter(&world) {
        assert_that(&position.0.y).is_equal_to(SPAWN_Y);
        assert_that(&(position.0.x >= SPAWN_MARGIN)).is_true();
        assert_that(&(position.0.x <= common::TEST_FIELD.x - SPAWN_MARGIN)).is_true();
        seen += 1;
    }
    assert_that(&(seen >= 30)).is_true();
}

#[test]
fn test_narrow_field_spawns_on_centerline() {
    let mut world = common::create_test_world();
    world.insert_resource(FieldSize(Vec2::new(100.0, 600.0)));
    world.insert_resource(DeltaTime(1.0));

    world.run_system_once(spawn_system).expect("System should run");

    let mut query = world.query_filtered::<&Position, With<Falling>>();
    let position = query.single(&world).expect("One entity should have spawned");
    assert_that(&position.0.x).is_equal_to(50.0);
}

#[test]
fn test_spawn_velocity_follows_current_difficulty() {
    let mut world = common::create_test_world();
    world.insert_resource(Difficulty {
        fall_speed: 400.0,
        spawn_interval_ms: 900,
    });
    world.insert_resource(DeltaTime(1.0));

    world.run_system_once(spawn_system).expect("System should run");

    let mut query = world.query_filtered::<(&Velocity, &EntityKind), With<Falling>>();
    let (velocity, kind) = query.single(&world).expect("One entity should have spawned");
    let expected = match kind {
        EntityKind::Bomb => 480.0,
        EntityKind::Fruit(_) => 400.0,
    };
    assert_that(&velocity.0).is_equal_to(expected);
}

#[test]
fn test_shortened_interval_spawns_more_often() {
    let mut world = common::create_test_world();
    world.insert_resource(Difficulty {
        fall_speed: 220.0,
        spawn_interval_ms: 350,
    });

    // First firing drains the initial 0.9s arming; afterwards the timer
    // re-arms from the current 0.35s interval.
    world.insert_resource(DeltaTime(1.0));
    world.run_system_once(spawn_system).expect("System should run");
    assert_that(&common::count_falling(&mut world)).is_equal_to(1);

    world.insert_resource(DeltaTime(0.8));
    world.run_system_once(spawn_system).expect("System should run");
    assert_that(&common::count_falling(&mut world)).is_equal_to(3);
}
