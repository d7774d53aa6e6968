//! Plain data row types written by output backends.

/// One agent at one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRow {
    pub agent_id:  u32,
    /// Simulated seconds since the start of the run.
    pub time_secs: f64,
    pub x:         f64,
    pub y:         f64,
    /// Result of the observer's crossing predicate for this position.
    pub crossed:   bool,
}

/// Summary for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub time_secs:  f64,
    /// Agents that moved to a different bin this tick.
    pub rebucketed: u64,
}
