//! `ContinuousWorld` — an open bounded plane with range-and-frustum
//! perception.
//!
//! Bodies move freely in `[0, width] × [0, height]`; passive obstacles sit
//! wherever they were placed.  Perception is resolved against a per-tick
//! R-tree (via `rstar`) over every object position: a body perceives the
//! objects inside its frustum, nothing else.

use log::debug;
use mas_body::{AgentBody, Influence, InfluenceKind, MotionInfluence, Percept};
use mas_core::{ObjectId, Point2d};
use mas_object::SituatedObject;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::{EnvironmentModel, WorldAccess, WorldView};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the perception index: a 2-D `[x, y]` point with the
/// associated object id and whether it is a live body or an obstacle.
#[derive(Clone)]
struct SpatialEntry {
    point:   [f64; 2],
    id:      ObjectId,
    is_body: bool,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SpatialEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ContinuousWorld ───────────────────────────────────────────────────────────

/// The default model: an open plane where motion requests resolve against
/// the moving body's own limits and perception is frustum-filtered range
/// lookup.
pub struct ContinuousWorld {
    /// Passive objects included in snapshots and percepts.
    obstacles: Vec<SituatedObject>,

    /// Per-tick spatial index over every object position.  Rebuilt by
    /// `begin_perception`; empty before the first tick.
    index: RTree<SpatialEntry>,
}

impl ContinuousWorld {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            index: RTree::new(),
        }
    }

    /// Add a passive object to the plane.  Returns its id.
    pub fn add_obstacle(&mut self, obstacle: SituatedObject) -> ObjectId {
        let id = obstacle.id();
        self.obstacles.push(obstacle);
        id
    }

    /// The passive objects, in insertion order.
    pub fn obstacles(&self) -> &[SituatedObject] {
        &self.obstacles
    }

    fn obstacle(&self, id: ObjectId) -> Option<&SituatedObject> {
        self.obstacles.iter().find(|o| o.id() == id)
    }
}

impl Default for ContinuousWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentModel for ContinuousWorld {
    fn on_body_created(&mut self, body: &AgentBody) {
        debug!("body {} joined the plane", body.id());
    }

    fn on_body_destroyed(&mut self, body: &AgentBody) {
        debug!("body {} left the plane", body.id());
    }

    /// Every motion request resolves against its target's limits via the
    /// bounded-move helpers.  Foreign-targeted motion (pushes) goes through
    /// the same path, so the pushed body's limits cap the push.  Custom
    /// influences have no meaning on the open plane and are dropped.
    fn apply_influences(
        &mut self,
        world: &mut WorldAccess<'_>,
        motions: &[MotionInfluence],
        others: &[Influence],
    ) {
        for motion in motions {
            if !world.apply_motion(motion) {
                debug!("motion influence for departed body {} dropped", motion.target);
            }
        }

        for influence in others {
            match &influence.kind {
                InfluenceKind::Motion { mode, linear, angular } => {
                    let Some(target) = influence.target else {
                        continue;
                    };
                    let motion = MotionInfluence {
                        emitter: influence.emitter,
                        target,
                        mode: *mode,
                        linear: *linear,
                        angular: *angular,
                    };
                    if !world.apply_motion(&motion) {
                        debug!("motion influence for departed body {target} dropped");
                    }
                }
                InfluenceKind::Custom { tag, .. } => {
                    debug!("custom influence {tag:?} has no meaning on the open plane");
                }
                // Kill influences never reach the model; classification
                // already resolved them.
                InfluenceKind::Kill => {}
            }
        }
    }

    /// O(N) rebuild of the R-tree over post-resolution positions.  Built
    /// once per tick and shared by every `perceptions_for` call.
    fn begin_perception(&mut self, world: &WorldView<'_>) {
        let mut entries: Vec<SpatialEntry> =
            Vec::with_capacity(world.body_count() + self.obstacles.len());
        for body in world.bodies() {
            let position = body.position();
            entries.push(SpatialEntry {
                point: [position.x, position.y],
                id: body.id(),
                is_body: true,
            });
        }
        for obstacle in &self.obstacles {
            let position = obstacle.position();
            entries.push(SpatialEntry {
                point: [position.x, position.y],
                id: obstacle.id(),
                is_body: false,
            });
        }
        self.index = RTree::bulk_load(entries);
    }

    /// Range query around the body, then the frustum heading filter, self
    /// excluded.  Percepts are sorted by id so a body's view is stable
    /// across ticks when nothing moved.
    fn perceptions_for(&self, world: &WorldView<'_>, body: &AgentBody) -> Vec<Percept> {
        let frustum = body.frustum();
        let origin = body.position();
        let heading = body.angle();
        let range = frustum.range();

        let mut percepts: Vec<Percept> = Vec::new();
        for entry in self
            .index
            .locate_within_distance([origin.x, origin.y], range * range)
        {
            if entry.id == body.id() {
                continue;
            }
            let position = Point2d::new(entry.point[0], entry.point[1]);
            if !frustum.contains(origin, heading, position) {
                continue;
            }
            if entry.is_body {
                if let Some(other) = world.body(entry.id) {
                    percepts.push(Percept::of_body(other));
                }
            } else if let Some(obstacle) = self.obstacle(entry.id) {
                percepts.push(Percept::of_situated(obstacle));
            }
        }
        percepts.sort_by_key(|p| p.id);
        percepts
    }

    fn passive_objects(&self) -> Vec<Percept> {
        self.obstacles.iter().map(Percept::of_situated).collect()
    }
}
