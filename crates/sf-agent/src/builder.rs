//! Builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use sf_agent::{AgentStoreBuilder, BodyParams};
//! use sf_core::{Rect, SimRng, Vec2};
//!
//! let area = Rect::new(Vec2::new(-800.0, -150.0), Vec2::new(-400.0, 150.0)).unwrap();
//! let mut rng = SimRng::new(7);
//!
//! let mut builder = AgentStoreBuilder::new(/*seed=*/ 42);
//! builder.add(Vec2::new(0.0, 0.0), BodyParams::default()).unwrap();
//! builder.scatter(16, &area, BodyParams::default(), &mut rng).unwrap();
//! let (store, rngs) = builder.build();
//!
//! assert_eq!(store.count, 17);
//! assert_eq!(rngs.len(), 17);
//! ```

use std::ops::Range;

use sf_core::{AgentId, Rect, SfError, SfResult, SimRng, Vec2};

use crate::{AgentRngs, AgentStore, Body, BodyParams};

/// Default number of placement draws per agent before scatter gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Spacing factor applied to the other agent's radius in the scatter
/// overlap test: a draw is rejected while `d < r_new + 1.1 * r_other`.
const SPAWN_SPACING: f64 = 1.1;

pub struct AgentStoreBuilder {
    seed:         u64,
    bodies:       Vec<Body>,
    max_attempts: u32,
}

impl AgentStoreBuilder {
    /// Create an empty builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, bodies: Vec::new(), max_attempts: DEFAULT_MAX_ATTEMPTS }
    }

    /// Per-agent draw budget for [`scatter`](Self::scatter).
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn next_id(&self) -> SfResult<AgentId> {
        AgentId::try_from(self.bodies.len())
            .map_err(|_| SfError::Config("too many agents for a 32-bit id".into()))
    }

    /// Place one agent at `position`.
    pub fn add(&mut self, position: Vec2, params: BodyParams) -> SfResult<AgentId> {
        params.validate()?;
        if !position.is_finite() {
            return Err(SfError::Config(format!("agent position must be finite, got {position}")));
        }
        let id = self.next_id()?;
        self.bodies.push(Body::new(id, position, &params));
        Ok(id)
    }

    /// Place `count` agents uniformly at random inside `area`.
    ///
    /// Each draw is repeated while it overlaps an agent placed earlier by the
    /// same call.  Agents from other calls are not checked, matching how
    /// separate groups spawn in separate areas.  Fails with
    /// [`SfError::Config`] when one agent needs more than the draw budget,
    /// which usually means `area` is too small for `count`; agents placed
    /// before the failure are removed again.
    ///
    /// Returns the contiguous id range of the new agents.
    pub fn scatter(
        &mut self,
        count: usize,
        area: &Rect,
        params: BodyParams,
        rng: &mut SimRng,
    ) -> SfResult<Range<AgentId>> {
        params.validate()?;
        let first = self.bodies.len();
        for _ in 0..count {
            if let Err(e) = self.place(area, &params, rng, first) {
                self.bodies.truncate(first);
                return Err(e);
            }
        }
        Ok(AgentId(first as u32)..AgentId(self.bodies.len() as u32))
    }

    /// Draw one non-overlapping position among the agents from `first` on.
    fn place(&mut self, area: &Rect, params: &BodyParams, rng: &mut SimRng, first: usize) -> SfResult<()> {
        let id = self.next_id()?;
        let group = &self.bodies[first..];
        for _ in 0..self.max_attempts {
            let p = rng.point_in(area);
            let clear = group.iter().all(|other| {
                p.distance(other.position) >= params.radius + other.radius * SPAWN_SPACING
            });
            if clear {
                self.bodies.push(Body::new(id, p, params));
                return Ok(());
            }
        }
        Err(SfError::Config(format!(
            "could not place {id} without overlap after {} attempts",
            self.max_attempts
        )))
    }

    /// Construct `AgentStore` and `AgentRngs`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let rngs = AgentRngs::new(self.bodies.len(), self.seed);
        (AgentStore::new(self.bodies), rngs)
    }
}
