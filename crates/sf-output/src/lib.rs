//! `sf-output`: telemetry writers for the social-force crowd simulator.
//!
//! The CSV backend creates two files in the output directory:
//!
//! | File                 | One row per                                   |
//! |----------------------|-----------------------------------------------|
//! | `telemetry.csv`      | agent per snapshot: id, time, position, crossed flag |
//! | `tick_summaries.csv` | tick: time and agents that changed bin        |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`TelemetryObserver`], which implements `sf_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sf_output::{CsvWriter, TelemetryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = TelemetryObserver::new(writer, &config, |p| p.y.abs() >= 170.0);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TelemetryObserver;
pub use row::{TelemetryRow, TickSummaryRow};
pub use writer::OutputWriter;
