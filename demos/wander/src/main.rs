//! wander — smallest example for the rust_mas situated-agent framework.
//!
//! Eight scouts wander a 100 × 100 plane dotted with rock obstacles.  Each
//! tick every scout reads its percepts, picks a steering request (random
//! drift, wall avoidance, separation from the nearest neighbor), and
//! submits it as an influence; the environment resolves motion, advances
//! the shared clock, and streams changed snapshots to a CSV trace.  A final
//! JSON world state lands next to the trace.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use mas_body::{AgentBody, Frustum, Influence};
use mas_core::{BodyRng, ObjectId, Point2d, Shape2d, Vector2d, WorldRng};
use mas_env::{ContinuousWorld, Environment};
use mas_object::{MotionLimits, ObjectKind, SituatedObject};
use mas_trace::CsvTrace;

// ── Constants ─────────────────────────────────────────────────────────────────

const BODY_COUNT:     usize = 8;
const OBSTACLE_COUNT: usize = 5;
const SEED:           u64   = 42;
const STEP_MS:        f64   = 500.0; // 1 tick = 0.5 s of virtual time
const TICKS:          u64   = 120;   // one virtual minute
const WORLD_SIDE:     f64   = 100.0;

const MAX_SPEED:      f64 = 6.0;  // units/s
const MAX_ACCEL:      f64 = 3.0;  // units/s²
const MAX_TURN:       f64 = 2.0;  // rad/s
const MAX_TURN_ACCEL: f64 = 4.0;  // rad/s²
const VIEW_RANGE:     f64 = 18.0;
const WALL_MARGIN:    f64 = 8.0;
const COMFORT_GAP:    f64 = 5.0;

// ── Wander steering ───────────────────────────────────────────────────────────

/// Pick this tick's steering request for one scout: random drift, a veer
/// back toward the middle near walls, and a push away from the nearest
/// percept inside the comfort gap.
fn steer(body: &AgentBody, rng: &mut BodyRng) -> Vector2d {
    let position = body.position();
    let drift_angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let mut request = Vector2d::from_angle(drift_angle) * MAX_ACCEL;

    if position.x < WALL_MARGIN {
        request.x += MAX_ACCEL;
    }
    if position.x > WORLD_SIDE - WALL_MARGIN {
        request.x -= MAX_ACCEL;
    }
    if position.y < WALL_MARGIN {
        request.y += MAX_ACCEL;
    }
    if position.y > WORLD_SIDE - WALL_MARGIN {
        request.y -= MAX_ACCEL;
    }

    let percepts = body.perceived_objects();
    let nearest = percepts.iter().min_by(|a, b| {
        let da = position.distance_squared(a.position);
        let db = position.distance_squared(b.position);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(near) = nearest {
        let away = position - near.position;
        if away.length() < COMFORT_GAP && !away.is_zero() {
            request = request + away.with_length(2.0 * MAX_ACCEL);
        }
    }

    request
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    use env_logger::Env;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    println!("=== wander — rust_mas situated agents ===");
    println!("Bodies: {BODY_COUNT}  |  Ticks: {TICKS}  |  Seed: {SEED}");
    println!();

    // 1. Build the world: an open plane with a few rocks.
    let mut world = ContinuousWorld::new();
    let mut layout_rng = WorldRng::new(SEED);
    for i in 0..OBSTACLE_COUNT {
        let mut rock = SituatedObject::new(
            ObjectId::random(),
            ObjectKind::Obstacle,
            Shape2d::circle(layout_rng.gen_range(1.0..3.0)),
        );
        rock.set_name(format!("rock-{i}"));
        rock.set_position(Point2d::new(
            layout_rng.gen_range(20.0..80.0),
            layout_rng.gen_range(20.0..80.0),
        ));
        world.add_obstacle(rock);
    }

    let mut env = Environment::new(WORLD_SIDE, WORLD_SIDE, STEP_MS, world);

    // 2. Register the scouts on a startup ring, facing outward.  Each scout
    //    keeps a deterministic RNG seeded from its id, so a rerun with the
    //    same seed replays identically.
    let limits = MotionLimits::new(MAX_SPEED, MAX_ACCEL, MAX_TURN, MAX_TURN_ACCEL);
    let mut scouts: Vec<(ObjectId, BodyRng)> = Vec::with_capacity(BODY_COUNT);
    for i in 0..BODY_COUNT {
        let mut body = AgentBody::new(
            ObjectId::random(),
            Shape2d::circle(0.5),
            limits,
            Frustum::circle(VIEW_RANGE),
        );
        body.set_name(format!("scout-{i}"));
        let id = body.id();

        let angle = i as f64 / BODY_COUNT as f64 * std::f64::consts::TAU;
        let position = Point2d::new(
            WORLD_SIDE / 2.0 + 15.0 * angle.cos(),
            WORLD_SIDE / 2.0 + 15.0 * angle.sin(),
        );
        env.register_body(body, position, angle)?;
        scouts.push((id, BodyRng::new(SEED, id)));
    }
    println!(
        "World: {WORLD_SIDE} × {WORLD_SIDE} plane, {OBSTACLE_COUNT} rocks, {} scouts",
        env.body_count()
    );

    // 3. Attach the CSV trace.
    std::fs::create_dir_all("output/wander")?;
    let trace = Arc::new(CsvTrace::create(Path::new("output/wander/trace.csv"))?);
    env.add_listener(trace.clone());

    // 4. Run, pacing each tick by the clock's wall delay.
    let clock = env.clock_handle();
    clock.set_simulation_delay(5.0);
    let pace = Duration::from_secs_f64(clock.simulation_delay() / 1e3);

    let t0 = Instant::now();
    for _ in 0..TICKS {
        for (id, rng) in &mut scouts {
            let Some(body) = env.body(*id) else { continue };
            let request = steer(body, rng);
            let turn = rng.gen_range(-1.0..1.0);
            env.submit_influence(*id, Influence::steering(request, turn));
        }
        env.step();
        thread::sleep(pace);
    }
    let elapsed = t0.elapsed();

    trace.flush()?;
    if let Some(e) = trace.take_error() {
        eprintln!("trace error: {e}");
    }

    // 5. Final world state as JSON.
    let state = env.state();
    serde_json::to_writer_pretty(File::create("output/wander/final_state.json")?, &state)?;

    // 6. Summary.
    println!(
        "Simulation complete in {:.3} s wall time ({})",
        elapsed.as_secs_f64(),
        clock
    );
    println!();
    println!("{:<10} {:>8} {:>8} {:>8}", "Scout", "x", "y", "speed");
    println!("{}", "-".repeat(38));
    for (id, _) in &scouts {
        let Some(body) = env.body(*id) else { continue };
        let position = body.position();
        println!(
            "{:<10} {:>8.2} {:>8.2} {:>8.2}",
            body.mobile().name().unwrap_or("?"),
            position.x,
            position.y,
            body.mobile().linear_motion().length(),
        );
    }

    Ok(())
}
