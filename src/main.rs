//! Aberred physics headless runner.
//!
//! Scatters a reproducible set of bodies inside the configured world, runs
//! the physics schedule for a number of fixed ticks and prints a JSON report
//! of what happened. Useful for profiling the broad phase and eyeballing the
//! collision counts after a change.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --bodies 500 --ticks 1200
//! ```

use aberredphysics::components::boxcollider::BoxCollider;
use aberredphysics::components::mapposition::MapPosition;
use aberredphysics::components::rigidbody::RigidBody;
use aberredphysics::components::scale::Scale;
use aberredphysics::events::collision::{CollisionEvent, observe_log_collision};
use aberredphysics::geometry::Rect;
use aberredphysics::resources::physicsconfig::PhysicsConfig;
use aberredphysics::simulation::{physics_schedule, setup_physics, step};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

const LAYER_WORLD: u32 = 0b0001;
const LAYER_BODY: u32 = 0b0010;
const LAYER_SENSOR: u32 = 0b0100;
const WALL_THICKNESS: f32 = 16.0;

/// Aberred Physics 2D
#[derive(Parser)]
#[command(version, about = "Headless runner for the Aberred 2D physics pipeline.")]
struct Cli {
    /// Path to the physics INI configuration.
    #[arg(long, value_name = "PATH", default_value = "./physics.ini")]
    config: PathBuf,

    /// Number of bodies to scatter in the world.
    #[arg(long, default_value_t = 200)]
    bodies: usize,

    /// Number of fixed ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seed for the scatter.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the effective configuration and exit.
    /// Optionally provide a path (default: the --config path).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,
}

#[derive(Resource, Default)]
struct CollisionStats {
    events: u64,
}

#[derive(Serialize)]
struct RunReport {
    bodies: usize,
    ticks: u32,
    seed: u64,
    fixed_delta: f32,
    collision_events: u64,
    events_per_tick: f64,
    wall_clock_ms: f64,
}

fn count_collisions(_trigger: On<CollisionEvent>, mut stats: ResMut<CollisionStats>) {
    stats.events += 1;
}

/// Four static walls around the world plus `count` random bodies inside it.
fn scatter_bodies(world: &mut World, rng: &mut fastrand::Rng, bounds: Rect, count: usize) {
    let center = bounds.center();
    let walls = [
        (Vec2::new(center.x, bounds.top()), Vec2::new(bounds.w, WALL_THICKNESS)),
        (Vec2::new(center.x, bounds.bottom()), Vec2::new(bounds.w, WALL_THICKNESS)),
        (Vec2::new(bounds.left(), center.y), Vec2::new(WALL_THICKNESS, bounds.h)),
        (Vec2::new(bounds.right(), center.y), Vec2::new(WALL_THICKNESS, bounds.h)),
    ];
    for (pos, size) in walls {
        world.spawn((
            MapPosition::from_vec(pos),
            BoxCollider::new(size.x, size.y)
                .with_layer(LAYER_WORLD)
                .with_mask(LAYER_BODY)
                .fixed(),
        ));
    }

    let margin = WALL_THICKNESS * 2.0;
    for i in 0..count {
        let pos = Vec2::new(
            bounds.x + margin + rng.f32() * (bounds.w - margin * 2.0).max(0.0),
            bounds.y + margin + rng.f32() * (bounds.h - margin * 2.0).max(0.0),
        );
        let velocity = Vec2::new(rng.f32() - 0.5, rng.f32() - 0.5) * 200.0;
        let size = 4.0 + rng.f32() * 12.0;
        let position = MapPosition::from_vec(pos);
        let scale = Scale::new(1.0 + rng.f32(), 1.0 + rng.f32());

        match i % 10 {
            // sensors sweep through everything without pushing
            0 => {
                world.spawn((
                    position,
                    scale,
                    BoxCollider::new(size, size)
                        .with_layer(LAYER_SENSOR)
                        .with_mask(LAYER_BODY)
                        .trigger(),
                    RigidBody::kinematic().with_velocity(velocity),
                ));
            }
            1 => {
                world.spawn((
                    position,
                    scale,
                    BoxCollider::new(size, size)
                        .with_layer(LAYER_BODY)
                        .with_mask(LAYER_WORLD | LAYER_BODY | LAYER_SENSOR),
                    RigidBody::kinematic().with_velocity(velocity),
                ));
            }
            _ => {
                world.spawn((
                    position,
                    scale,
                    BoxCollider::new(size, size)
                        .with_layer(LAYER_BODY)
                        .with_mask(LAYER_WORLD | LAYER_BODY | LAYER_SENSOR),
                    RigidBody::dynamic(0.5 + rng.f32() * 4.0)
                        .with_velocity(velocity)
                        .with_restitution(rng.f32())
                        .with_damping(0.999),
                ));
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = PhysicsConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }

    // Early-exit: write the effective configuration and quit
    if let Some(maybe_path) = cli.write_config {
        if let Some(path) = maybe_path {
            config.config_path = path;
        }
        if let Err(e) = config.save_to_file() {
            log::error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut world = World::new();
    setup_physics(&mut world, &config);
    world.insert_resource(CollisionStats::default());
    world.add_observer(count_collisions);
    world.add_observer(observe_log_collision);
    world.flush();

    let mut rng = fastrand::Rng::with_seed(cli.seed);
    scatter_bodies(&mut world, &mut rng, config.world_bounds(), cli.bodies);

    let mut schedule = physics_schedule();
    let started = Instant::now();
    for _ in 0..cli.ticks {
        step(&mut world, &mut schedule, config.fixed_delta);
    }
    let wall_clock_ms = started.elapsed().as_secs_f64() * 1000.0;

    let events = world.resource::<CollisionStats>().events;
    let report = RunReport {
        bodies: cli.bodies,
        ticks: cli.ticks,
        seed: cli.seed,
        fixed_delta: config.fixed_delta,
        collision_events: events,
        events_per_tick: if cli.ticks > 0 {
            events as f64 / cli.ticks as f64
        } else {
            0.0
        },
        wall_clock_ms,
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize run report: {}", e);
            std::process::exit(1);
        }
    }
}
