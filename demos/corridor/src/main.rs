//! corridor: two crowds swapping ends of a walled corridor.
//!
//! 64 pedestrians start in two groups at opposite ends of a corridor with a
//! pillar in the middle.  Most pick random destinations and route to them
//! with A*; the first four of each group trail a leader instead.  Telemetry
//! lands in `output/corridor/`, with `crossed` set once an agent stands in
//! the upper or lower gap band (`|y| >= 170`).
//!
//! Pass a scenario JSON path as the first argument to run something else.
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sf_agent::Body;
use sf_core::{Tick, Vec2};
use sf_nav::AStarRouter;
use sf_output::{CsvWriter, TelemetryObserver};
use sf_scenario::Scenario;
use sf_sim::SimObserver;
use sf_spatial::Obstacle;

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str  = "output/corridor";
const CROSSING_Y: f64   = 170.0;
const TABLE_ROWS: usize = 10;

// ── Scenario ──────────────────────────────────────────────────────────────────

// 300 simulated seconds at dt = 0.05, one telemetry snapshot per second.
const CORRIDOR_JSON: &str = r#"{
    "sim": { "total_ticks": 6000, "seed": 42, "output_interval_ticks": 20 },
    "world": { "bounds": { "min": [-900, -400], "max": [900, 400] }, "bins": [10, 5] },
    "obstacles": [
        { "min": [-890, 200],  "max": [890, 390] },
        { "min": [-890, -390], "max": [890, -200] },
        { "min": [-150, -100], "max": [150, 100] },
        { "min": [-890, -390], "max": [890, 390], "inner": true }
    ],
    "waypoints": {
        "random": [
            { "area": { "min": [400, -150],  "max": [800, 150] },  "count": 50 },
            { "area": { "min": [-800, -150], "max": [-400, 150] }, "count": 50 }
        ],
        "fixed": [[-200, 170], [200, 170], [-200, -170], [200, -170]]
    },
    "groups": [
        { "count": 32, "area": { "min": [-800, -150], "max": [-400, 150] },
          "behavior": { "kind": "pathfinder" }, "followers": 4, "leader": 5 },
        { "count": 32, "area": { "min": [400, -150], "max": [800, 150] },
          "behavior": { "kind": "pathfinder" }, "followers": 4, "leader": 5 }
    ]
}"#;

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<O: SimObserver> {
    inner:         O,
    snapshot_rows: usize,
    summary_rows:  usize,
    crossed:       usize,
}

impl<O: SimObserver> CountingObserver<O> {
    fn new(inner: O) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, crossed: 0 }
    }
}

impl<O: SimObserver> SimObserver for CountingObserver<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, rebucketed: usize) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, rebucketed);
    }

    fn on_snapshot(&mut self, tick: Tick, time_secs: f64, bodies: &[Body], obstacles: &[Obstacle]) {
        self.snapshot_rows += bodies.len();
        self.crossed = bodies.iter().filter(|b| crossed(b.position)).count();
        self.inner.on_snapshot(tick, time_secs, bodies, obstacles);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

fn crossed(p: Vec2) -> bool {
    p.y.abs() >= CROSSING_Y
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== corridor: social force crowd ===");

    // 1. Load the scenario: embedded corridor unless a path was given.
    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::load_from_file(Path::new(&path))
            .with_context(|| format!("loading scenario {path}"))?,
        None => Scenario::load_from_json(CORRIDOR_JSON)?,
    };
    let config = scenario.config.clone();
    println!(
        "Agents: {}  |  Waypoints: {}  |  Mesh: {} triangles  |  Seed: {}",
        scenario.agents.count,
        scenario.waypoints.len(),
        scenario.mesh.triangle_count(),
        config.seed,
    );
    println!(
        "Sim: {} ticks × {:.3} s = {:.0} s, output every {} ticks",
        config.total_ticks,
        config.dt_secs,
        config.total_ticks as f64 * config.dt_secs,
        config.output_interval_ticks,
    );
    println!();

    // 2. Thread pool.
    if let Some(n) = config.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configuring the rayon thread pool")?;
        info!(threads = n, "rayon pool configured");
    }

    // 3. Build sim.
    let mut sim = scenario.into_sim(AStarRouter::default())?;

    // 4. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    info!(dir = OUTPUT_DIR, "writing telemetry");
    let inner_obs = TelemetryObserver::new(writer, &config, crossed);
    let mut obs = CountingObserver::new(inner_obs);

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        error!(%e, "telemetry output failed");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  telemetry.csv      : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!("  crossed at last snapshot: {} of {}", obs.crossed, sim.bodies().len());
    println!();

    // 7. Final positions of the first few agents.
    println!("{:<8} {:>10} {:>10} {:>8}", "Agent", "x", "y", "speed");
    println!("{}", "-".repeat(40));
    for body in sim.bodies().iter().take(TABLE_ROWS) {
        println!(
            "{:<8} {:>10.1} {:>10.1} {:>8.2}",
            body.id.0,
            body.position.x,
            body.position.y,
            body.velocity.length(),
        );
    }

    Ok(())
}
