//! Simulation observer trait: the presentation and telemetry sink.

use sf_agent::Body;
use sf_core::Tick;
use sf_spatial::Obstacle;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers see read-only state between
/// ticks and cannot feed anything back into the simulation.
///
/// # Example: a progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, rebucketed: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {rebucketed} agents changed bin");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `rebucketed` is the number of agents that changed bin this tick.
    fn on_tick_end(&mut self, _tick: Tick, _rebucketed: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) once the tick has been applied.
    ///
    /// `time_secs` is the simulated time the snapshot reflects.  `bodies` is
    /// indexed by `AgentId` and carries each agent's position, velocity,
    /// radius and last net force.
    fn on_snapshot(
        &mut self,
        _tick:      Tick,
        _time_secs: f64,
        _bodies:    &[Body],
        _obstacles: &[Obstacle],
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
