//! Serde structures mirroring the JSON scenario format.
//!
//! Points are `[x, y]` arrays and rectangles `{ "min": [x, y], "max": [x, y] }`.
//! Everything except `world` has a default, so a minimal file is just a world
//! plus some agents.
//!
//! ```json
//! {
//!   "sim":       { "total_ticks": 6000, "seed": 7 },
//!   "world":     { "bounds": { "min": [-900, -400], "max": [900, 400] }, "bins": [10, 5] },
//!   "obstacles": [ { "min": [-150, -100], "max": [150, 100] } ],
//!   "waypoints": { "random": [ { "area": { "min": [400, -150], "max": [800, 150] }, "count": 50 } ] },
//!   "groups":    [ { "count": 32, "area": { "min": [-800, -150], "max": [-400, 150] },
//!                    "behavior": { "kind": "pathfinder" }, "followers": 4, "leader": 5 } ]
//! }
//! ```

use serde::Deserialize;
use sf_agent::BodyParams;
use sf_core::SimConfig;
use sf_mobility::ForceParams;

pub type PointJson = [f64; 2];

/// Top-level scenario file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    #[serde(default)]
    pub sim:       SimConfig,
    pub world:     WorldJson,
    #[serde(default)]
    pub forces:    ForcesJson,
    #[serde(default)]
    pub obstacles: Vec<ObstacleJson>,
    #[serde(default)]
    pub waypoints: WaypointsJson,
    #[serde(default)]
    pub agents:    Vec<AgentJson>,
    #[serde(default)]
    pub groups:    Vec<GroupJson>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RectJson {
    pub min: PointJson,
    pub max: PointJson,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorldJson {
    pub bounds: RectJson,
    /// Bin counts along x and y.
    pub bins:   [usize; 2],
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObstacleJson {
    pub min:   PointJson,
    pub max:   PointJson,
    /// `true` for a containment region agents must stay inside.
    #[serde(default)]
    pub inner: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaypointsJson {
    pub random:         Vec<RandomWaypointsJson>,
    pub fixed:          Vec<PointJson>,
    /// Drop waypoints that land inside a solid obstacle.
    pub reject_blocked: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RandomWaypointsJson {
    pub area:  RectJson,
    pub count: usize,
}

/// Physical parameters; omitted fields take the `BodyParams` defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ParamsJson {
    pub radius:         f64,
    pub mass:           f64,
    pub desired_speed:  f64,
    pub alpha:          f64,
    pub wall_threshold: f64,
}

impl Default for ParamsJson {
    fn default() -> Self {
        let d = BodyParams::default();
        Self {
            radius:         d.radius,
            mass:           d.mass,
            desired_speed:  d.desired_speed,
            alpha:          d.alpha,
            wall_threshold: d.wall_threshold,
        }
    }
}

impl From<ParamsJson> for BodyParams {
    fn from(p: ParamsJson) -> Self {
        BodyParams {
            radius:         p.radius,
            mass:           p.mass,
            desired_speed:  p.desired_speed,
            alpha:          p.alpha,
            wall_threshold: p.wall_threshold,
        }
    }
}

/// Force constants; omitted fields take the `ForceParams` defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ForcesJson {
    pub intermediate_gain: f64,
    pub near_gain:         f64,
    pub contact_gain:      f64,
    pub overlap_boost:     f64,
    pub contact_reach:     f64,
    pub friction:          f64,
    pub wall_gain:         f64,
    pub overlap_ratio:     f64,
    pub inhibit_threshold: f64,
    /// `null` turns the kinematic constraint off.
    pub kinematic_safety:  Option<f64>,
}

impl Default for ForcesJson {
    fn default() -> Self {
        let d = ForceParams::default();
        Self {
            intermediate_gain: d.intermediate_gain,
            near_gain:         d.near_gain,
            contact_gain:      d.contact_gain,
            overlap_boost:     d.overlap_boost,
            contact_reach:     d.contact_reach,
            friction:          d.friction,
            wall_gain:         d.wall_gain,
            overlap_ratio:     d.overlap_ratio,
            inhibit_threshold: d.inhibit_threshold,
            kinematic_safety:  d.kinematic_safety,
        }
    }
}

impl From<ForcesJson> for ForceParams {
    fn from(f: ForcesJson) -> Self {
        ForceParams {
            intermediate_gain: f.intermediate_gain,
            near_gain:         f.near_gain,
            contact_gain:      f.contact_gain,
            overlap_boost:     f.overlap_boost,
            contact_reach:     f.contact_reach,
            friction:          f.friction,
            wall_gain:         f.wall_gain,
            overlap_ratio:     f.overlap_ratio,
            inhibit_threshold: f.inhibit_threshold,
            kinematic_safety:  f.kinematic_safety,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GoalJson {
    pub target: PointJson,
    #[serde(default)]
    pub range:  f64,
    #[serde(default)]
    pub loiter: f64,
}

/// Behavior assignment, tagged by `kind`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BehaviorJson {
    #[default]
    Idle,
    Goal(GoalJson),
    /// Follow the agent with this absolute id.
    Follow { target: u32 },
    /// Wander among `goals`, or among every scenario waypoint with the given
    /// `range` and `loiter` when `goals` is empty.
    Wander {
        #[serde(default)]
        goals:  Vec<GoalJson>,
        #[serde(default)]
        range:  f64,
        #[serde(default)]
        loiter: f64,
    },
    Path { goals: Vec<GoalJson> },
    Pathfinder,
}

/// One explicitly placed agent.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentJson {
    pub position: PointJson,
    #[serde(default)]
    pub params:   ParamsJson,
    #[serde(default)]
    pub behavior: BehaviorJson,
}

/// Agents scattered without overlap inside `area`.
///
/// The first `followers` members follow the member at index `leader` (both
/// relative to the group); the rest get `behavior`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupJson {
    pub count:     usize,
    pub area:      RectJson,
    #[serde(default)]
    pub params:    ParamsJson,
    #[serde(default)]
    pub behavior:  BehaviorJson,
    #[serde(default)]
    pub followers: usize,
    #[serde(default)]
    pub leader:    usize,
}
