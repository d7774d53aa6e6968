//! The `Sim` struct and its tick loop.

use sf_agent::{AgentRngs, AgentStore, Body};
use sf_behavior::{Behavior, BehaviorContext};
use sf_core::{AgentRng, SimClock, SimConfig, Tick};
use sf_mobility::{Drive, ForceModel};
use sf_nav::{Router, Triangulation};
use sf_spatial::{BinIndex, Obstacle};
use tracing::{debug, info};

use crate::{SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<R>` owns every piece of simulation state: there are no globals, so
/// any number of independent simulations can run side by side.  Each tick:
///
/// 1. **Snapshot**: clone every body.  Behaviors and force laws read other
///    agents only from this copy.
/// 2. **Agent phase** (optionally parallel with the `parallel` feature): for
///    each agent, steer with its [`Behavior`], gather neighbors from the bin
///    index, and apply [`ForceModel::step`].
/// 3. **Rebucket phase** (sequential): [`BinIndex::update`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router> {
    /// Global configuration (total ticks, seed, tick duration, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to seconds.
    pub clock: SimClock,

    /// Agent bodies, indexed by `AgentId`.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Per-agent behaviors, indexed by `AgentId`.
    pub behaviors: Vec<Behavior>,

    pub obstacles: Vec<Obstacle>,

    /// Waypoint mesh shared by every pathfinding behavior.
    pub mesh: Triangulation,

    /// Uniform grid used for neighbor queries.  The only shared structure
    /// written during a tick, and only in the sequential rebucket phase.
    pub bins: BinIndex,

    pub forces: ForceModel,

    pub router: R,
}

impl<R: Router> Sim<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.agents.count,
            from = %self.clock.current_tick,
            to = %self.config.end_tick(),
            "simulation started"
        );
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.tick(now, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(clock = %self.clock, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.tick(now, observer)?;
        }
        Ok(())
    }

    /// Every agent's body, indexed by `AgentId`.
    pub fn bodies(&self) -> &[Body] {
        &self.agents.bodies
    }

    /// Simulated seconds elapsed so far.
    pub fn time_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(now);
        let rebucketed = self.process_tick(now, cfg!(feature = "parallel"))?;
        observer.on_tick_end(now, rebucketed);
        self.clock.advance();

        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(
                now,
                self.clock.elapsed_secs(),
                &self.agents.bodies,
                &self.obstacles,
            );
        }
        Ok(())
    }

    /// Agent and rebucket phases of one tick.  `parallel` selects the Rayon
    /// fan-out; without the `parallel` feature it is ignored.
    pub(crate) fn process_tick(&mut self, now: Tick, parallel: bool) -> SimResult<usize> {
        // ── Phase 1: start-of-tick snapshot ───────────────────────────────
        let snapshot: Vec<Body> = self.agents.bodies.clone();

        // ── Phase 2: steer + integrate every agent ────────────────────────
        //
        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = BehaviorContext::new(
            self.clock.secs_at(now),
            self.config.dt_secs,
            &snapshot,
            &self.obstacles,
            &self.mesh,
            &self.router,
        );
        let shared = Shared {
            ctx:    &ctx,
            bins:   &self.bins,
            forces: &self.forces,
            radius: self.config.neighbor_radius,
        };
        let bodies    = &mut self.agents.bodies;
        let behaviors = &mut self.behaviors;
        let rngs      = &mut self.rngs.inner;

        if parallel && cfg!(feature = "parallel") {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;

                bodies
                    .par_iter_mut()
                    .zip(behaviors.par_iter_mut())
                    .zip(rngs.par_iter_mut())
                    .for_each(|((body, behavior), rng)| shared.update_agent(body, behavior, rng));
            }
        } else {
            for ((body, behavior), rng) in
                bodies.iter_mut().zip(behaviors.iter_mut()).zip(rngs.iter_mut())
            {
                shared.update_agent(body, behavior, rng);
            }
        }

        // ── Phase 3: rebucket (sequential) ────────────────────────────────
        let bodies = &self.agents.bodies;
        let rebucketed = self.bins.update(|agent| bodies[agent.index()].position)?;
        debug!(tick = %now, rebucketed, "tick applied");
        Ok(rebucketed)
    }
}

// ── Per-agent update ──────────────────────────────────────────────────────────

/// Read-only state every agent update shares during phase 2.
struct Shared<'a> {
    ctx:    &'a BehaviorContext<'a>,
    bins:   &'a BinIndex,
    forces: &'a ForceModel,
    radius: u32,
}

impl Shared<'_> {
    fn update_agent(&self, body: &mut Body, behavior: &mut Behavior, rng: &mut AgentRng) {
        let steering = behavior.steer(body, self.ctx, rng);

        let me = body.id;
        let neighbors: Vec<&Body> = self
            .bins
            .surrounding(body.position, self.radius)
            .into_iter()
            .filter(|&other| other != me)
            .filter_map(|other| self.ctx.bodies.get(other.index()))
            .collect();

        let drive = Drive { target: steering.target, reset_stall: steering.reset_stall };
        self.forces.step(body, drive, &neighbors, self.ctx.obstacles, self.ctx.dt_secs);
    }
}
