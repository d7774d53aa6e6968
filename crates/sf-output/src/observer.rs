//! `TelemetryObserver<W, F>`: bridges `SimObserver` to an `OutputWriter`.

use sf_agent::Body;
use sf_core::{SimConfig, Tick, Vec2};
use sf_sim::SimObserver;
use sf_spatial::Obstacle;

use crate::row::{TelemetryRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes per-agent telemetry and tick summaries to
/// any [`OutputWriter`].
///
/// `crossed` classifies each snapshot position, e.g. "has reached the far
/// side of the corridor".  It sees only the position and cannot touch the
/// simulation.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TelemetryObserver<W, F>
where
    W: OutputWriter,
    F: Fn(Vec2) -> bool,
{
    writer:     W,
    crossed:    F,
    dt_secs:    f64,
    last_error: Option<OutputError>,
}

impl<W, F> TelemetryObserver<W, F>
where
    W: OutputWriter,
    F: Fn(Vec2) -> bool,
{
    /// Create an observer backed by `writer`, using `config` for the tick to
    /// seconds conversion.
    pub fn new(writer: W, config: &SimConfig, crossed: F) -> Self {
        Self { writer, crossed, dt_secs: config.dt_secs, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W, F> SimObserver for TelemetryObserver<W, F>
where
    W: OutputWriter,
    F: Fn(Vec2) -> bool,
{
    fn on_tick_end(&mut self, tick: Tick, rebucketed: usize) {
        let row = TickSummaryRow {
            tick:       tick.0,
            time_secs:  (tick.0 + 1) as f64 * self.dt_secs,
            rebucketed: rebucketed as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, _tick: Tick, time_secs: f64, bodies: &[Body], _obstacles: &[Obstacle]) {
        let rows: Vec<TelemetryRow> = bodies
            .iter()
            .map(|b| TelemetryRow {
                agent_id: b.id.0,
                time_secs,
                x:        b.position.x,
                y:        b.position.y,
                crossed:  (self.crossed)(b.position),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_telemetry(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
