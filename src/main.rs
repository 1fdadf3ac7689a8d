//! Headless demo host: an autopilot session at a fixed 60 Hz cadence.

use std::time::Instant;

use anyhow::Context;
use bevy_ecs::query::With;
use tracing::{debug, error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use fruitfall::config::SessionConfig;
use fruitfall::constants::LOOP_TIME;
use fruitfall::events::GameEvent;
use fruitfall::formatter::{self, TickFormatter};
use fruitfall::session::Session;
use fruitfall::storage::JsonFileStore;
use fruitfall::systems::{Basket, EntityKind, Falling, Position};

/// How fast the autopilot slides the basket, in px/s.
const AUTOPILOT_SPEED: f32 = 600.0;

const HIGH_SCORE_PATH: &str = "high_score.json";

fn main() -> anyhow::Result<()> {
    setup_logging()?;

    let store = JsonFileStore::new(HIGH_SCORE_PATH);
    let mut session = Session::new(SessionConfig::default(), Box::new(store));

    info!(loop_time = ?LOOP_TIME, "Starting demo loop");

    let mut last = Instant::now();
    'running: loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;

        steer(&mut session, dt);
        session.tick(dt);
        formatter::increment_tick();

        for event in session.drain_events() {
            match event {
                GameEvent::GameOver { score, new_high_score } => {
                    info!(score, new_high_score, "Game over, exiting demo");
                    break 'running;
                }
                event => debug!(?event, "Session event"),
            }
        }
        for session_error in session.drain_errors() {
            error!(%session_error, "Session reported an error");
        }

        let elapsed = frame_start.elapsed();
        if elapsed < LOOP_TIME {
            spin_sleep::sleep(LOOP_TIME - elapsed);
        }
    }

    session.teardown();
    Ok(())
}

fn setup_logging() -> anyhow::Result<()> {
    // RUST_LOG overrides; default keeps our crate chatty and the rest quiet.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=debug", env!("CARGO_CRATE_NAME"))));

    let subscriber = tracing_subscriber::fmt()
        .event_format(TickFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set global tracing subscriber")
}

/// Slides the basket toward the lowest falling fruit, attract-mode style.
/// Bombs are left alone; missing them is the point.
fn steer(session: &mut Session, dt: f32) {
    let Some(target) = lowest_fruit_x(session) else { return };
    let Some(basket_x) = basket_x(session) else { return };

    let step = AUTOPILOT_SPEED * dt;
    let next = if (target - basket_x).abs() <= step {
        target
    } else {
        basket_x + step.copysign(target - basket_x)
    };
    session.set_catcher_x(next);
}

fn lowest_fruit_x(session: &mut Session) -> Option<f32> {
    let mut falling = session.world.query_filtered::<(&Position, &EntityKind), With<Falling>>();
    falling
        .iter(&session.world)
        .filter(|(_, kind)| kind.is_fruit())
        .max_by(|(a, _), (b, _)| a.0.y.total_cmp(&b.0.y))
        .map(|(position, _)| position.0.x)
}

fn basket_x(session: &mut Session) -> Option<f32> {
    let mut basket = session.world.query_filtered::<&Position, With<Basket>>();
    basket.single(&session.world).ok().map(|position| position.0.x)
}
