//! Turn a parsed [`ScenarioFile`] into validated simulation inputs.

use std::path::Path;

use sf_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use sf_behavior::{
    Behavior, FollowerBehavior, GoalBehavior, PathBehavior, PathfinderBehavior, WanderBehavior,
};
use sf_core::{AgentId, Rect, SimConfig, SimRng, Vec2};
use sf_mobility::ForceModel;
use sf_nav::{Goal, Router, Triangulation};
use sf_sim::{Sim, SimBuilder, SimResult};
use sf_spatial::{BinIndex, Obstacle};
use tracing::{info, warn};

use crate::file::{
    BehaviorJson, GoalJson, PointJson, RectJson, ScenarioFile, WaypointsJson,
};
use crate::{ScenarioError, ScenarioResult};

/// RNG stream offsets under the scenario seed.
const WAYPOINT_STREAM: u64 = 1;
const SPAWN_STREAM: u64 = 2;

/// Everything a [`Sim`] needs, checked and built.
pub struct Scenario {
    pub config:    SimConfig,
    /// Empty grid over the world bounds; agents are filed by `SimBuilder`.
    pub bins:      BinIndex,
    pub obstacles: Vec<Obstacle>,
    /// Candidate waypoints after generation and filtering.
    pub waypoints: Vec<Vec2>,
    pub mesh:      Triangulation,
    pub forces:    ForceModel,
    pub agents:    AgentStore,
    pub rngs:      AgentRngs,
    /// Indexed by `AgentId`.
    pub behaviors: Vec<Behavior>,
}

impl Scenario {
    /// Load a scenario from a JSON string.
    pub fn load_from_json(json: &str) -> ScenarioResult<Self> {
        let file: ScenarioFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Load a scenario from a JSON file on disk.
    pub fn load_from_file(path: &Path) -> ScenarioResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_json(&content)
    }

    /// Validate `file` and build every simulation input from it.
    ///
    /// Explicit `agents` get ids first, then each group in order.  Random
    /// waypoints and group spawn positions come from separate streams of the
    /// `sim.seed` RNG, so the same file always yields the same scenario.
    pub fn from_file(file: ScenarioFile) -> ScenarioResult<Self> {
        file.sim.validate()?;

        let bounds = rect(file.world.bounds)?;
        let bins = BinIndex::new(bounds, file.world.bins[0], file.world.bins[1])?;
        let obstacles = file
            .obstacles
            .iter()
            .map(|o| Ok(Obstacle::new(Rect::new(point(o.min), point(o.max))?, o.inner)))
            .collect::<ScenarioResult<Vec<_>>>()?;
        let forces = ForceModel::new(file.forces.into())?;

        let mut root = SimRng::new(file.sim.seed);
        let waypoints =
            generate_waypoints(&file.waypoints, &obstacles, &mut root.child(WAYPOINT_STREAM))?;
        let mesh = Triangulation::bowyer_watson(&waypoints);

        // ── Agents ────────────────────────────────────────────────────────
        let total = file.agents.len() + file.groups.iter().map(|g| g.count).sum::<usize>();
        let mut builder = AgentStoreBuilder::new(file.sim.seed);
        let mut behaviors = Vec::with_capacity(total);

        for agent in &file.agents {
            builder.add(point(agent.position), agent.params.into())?;
            behaviors.push(make_behavior(&agent.behavior, &waypoints)?);
        }

        let mut spawn_rng = root.child(SPAWN_STREAM);
        for (index, group) in file.groups.iter().enumerate() {
            if group.followers > 0 && (group.leader >= group.count || group.leader < group.followers) {
                return Err(ScenarioError::Invalid(format!(
                    "group {index}: leader {} must be a non-follower member (count {}, followers {})",
                    group.leader, group.count, group.followers
                )));
            }
            let ids = builder.scatter(group.count, &rect(group.area)?, group.params.into(), &mut spawn_rng)?;
            let leader = AgentId(ids.start.0 + group.leader as u32);
            for member in 0..group.count {
                let behavior = if member < group.followers {
                    Behavior::Follow(FollowerBehavior::new(leader))
                } else {
                    make_behavior(&group.behavior, &waypoints)?
                };
                behaviors.push(behavior);
            }
        }

        for (i, behavior) in behaviors.iter().enumerate() {
            behavior.validate(AgentId(i as u32), total)?;
        }
        if mesh.is_empty() && behaviors.iter().any(|b| matches!(b, Behavior::Pathfinder(_))) {
            return Err(ScenarioError::Invalid(
                "pathfinder agents need at least three non-collinear waypoints".into(),
            ));
        }

        let (agents, rngs) = builder.build();
        info!(
            agents = agents.count,
            obstacles = obstacles.len(),
            waypoints = waypoints.len(),
            triangles = mesh.triangle_count(),
            bins_x = bins.bins_x(),
            bins_y = bins.bins_y(),
            "scenario loaded"
        );

        Ok(Self {
            config: file.sim,
            bins,
            obstacles,
            waypoints,
            mesh,
            forces,
            agents,
            rngs,
            behaviors,
        })
    }

    /// Hand every input to a [`SimBuilder`] and build the simulation.
    pub fn into_sim<R: Router>(self, router: R) -> SimResult<Sim<R>> {
        SimBuilder::new(self.config, self.agents, self.rngs, self.bins, router)
            .behaviors(self.behaviors)
            .obstacles(self.obstacles)
            .mesh(self.mesh)
            .forces(self.forces)
            .build()
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[inline]
fn point(p: PointJson) -> Vec2 {
    Vec2::new(p[0], p[1])
}

fn rect(r: RectJson) -> ScenarioResult<Rect> {
    Ok(Rect::new(point(r.min), point(r.max))?)
}

fn check_goal_times(range: f64, loiter: f64) -> ScenarioResult<()> {
    for (name, value) in [("range", range), ("loiter", loiter)] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(ScenarioError::Invalid(format!("goal {name} must be non-negative, got {value}")));
        }
    }
    Ok(())
}

fn goal(g: &GoalJson) -> ScenarioResult<Goal> {
    let target = point(g.target);
    if !target.is_finite() {
        return Err(ScenarioError::Invalid(format!("goal target must be finite, got {target}")));
    }
    check_goal_times(g.range, g.loiter)?;
    Ok(Goal::new(target, g.range, g.loiter))
}

fn goals(list: &[GoalJson]) -> ScenarioResult<Vec<Goal>> {
    list.iter().map(goal).collect()
}

fn make_behavior(json: &BehaviorJson, waypoints: &[Vec2]) -> ScenarioResult<Behavior> {
    Ok(match json {
        BehaviorJson::Idle => Behavior::Idle,
        BehaviorJson::Goal(g) => Behavior::Goal(GoalBehavior::new(goal(g)?)),
        BehaviorJson::Follow { target } => Behavior::Follow(FollowerBehavior::new(AgentId(*target))),
        BehaviorJson::Wander { goals: list, range, loiter } => {
            let candidates = if list.is_empty() {
                check_goal_times(*range, *loiter)?;
                waypoints.iter().map(|&p| Goal::new(p, *range, *loiter)).collect()
            } else {
                goals(list)?
            };
            Behavior::Wander(WanderBehavior::new(candidates)?)
        }
        BehaviorJson::Path { goals: list } => {
            Behavior::Path(PathBehavior::new(goals(list)?.into_iter().collect()))
        }
        BehaviorJson::Pathfinder => Behavior::Pathfinder(PathfinderBehavior::new()),
    })
}

/// Random waypoints per area, then the fixed ones, optionally dropping any
/// inside a solid obstacle.
fn generate_waypoints(
    json:      &WaypointsJson,
    obstacles: &[Obstacle],
    rng:       &mut SimRng,
) -> ScenarioResult<Vec<Vec2>> {
    let mut points = Vec::new();
    for area in &json.random {
        let area_rect = rect(area.area)?;
        points.extend((0..area.count).map(|_| rng.point_in(&area_rect)));
    }
    points.extend(json.fixed.iter().copied().map(point));

    if json.reject_blocked {
        let before = points.len();
        points.retain(|&p| !obstacles.iter().any(|o| !o.inner && o.rect.contains(p)));
        let dropped = before - points.len();
        if dropped > 0 {
            warn!(dropped, kept = points.len(), "dropped waypoints inside solid obstacles");
        }
    }
    Ok(points)
}
