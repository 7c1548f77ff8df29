//! Situated objects: identity, pose, footprint, naming.

use std::fmt;

use log::warn;

use mas_core::{Bounds2d, ObjectId, Point2d, Shape2d, Vector2d};

// ── ObjectKind ────────────────────────────────────────────────────────────────

/// Coarse classification tag carried by every situated object.
///
/// Percepts expose the tag so behaviors can react to what something *is*
/// without downcasting.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ObjectKind {
    /// An agent-controlled body.
    Body,
    /// A static blocking object.
    Obstacle,
    /// A non-blocking point of interest.
    Marker,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Body => "body",
            ObjectKind::Obstacle => "obstacle",
            ObjectKind::Marker => "marker",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SituatedObject ────────────────────────────────────────────────────────────

/// Anything placed in a world: identity, position, footprint, kind, and an
/// optional human-readable name.
///
/// The footprint is stored relative to the position (centered on it); use
/// [`world_bounds`][Self::world_bounds] for world-frame geometry.
///
/// Position writes containing NaN are rejected with a diagnostic and the
/// previous position is retained — a corrupt motion request must never
/// corrupt the world state.
#[derive(Clone, Debug)]
pub struct SituatedObject {
    id: ObjectId,
    kind: ObjectKind,
    name: Option<String>,
    position: Point2d,
    shape: Shape2d,
}

impl SituatedObject {
    pub fn new(id: ObjectId, kind: ObjectKind, shape: Shape2d) -> Self {
        Self {
            id,
            kind,
            name: None,
            position: Point2d::ORIGIN,
            shape,
        }
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    #[inline]
    pub fn position(&self) -> Point2d {
        self.position
    }

    #[inline]
    pub fn shape(&self) -> Shape2d {
        self.shape
    }

    /// Bounding box of the footprint in world coordinates.
    #[inline]
    pub fn world_bounds(&self) -> Bounds2d {
        self.shape.bounds_at(self.position)
    }

    /// Set the absolute position.  A NaN component drops the write.
    pub fn set_position(&mut self, position: Point2d) {
        if position.has_nan() {
            warn!(
                "rejected NaN position write on object {}: ({}, {})",
                self.id, position.x, position.y
            );
            return;
        }
        self.position = position;
    }

    /// Displace the position by `delta`.  A NaN component drops the write.
    pub fn add_position(&mut self, delta: Vector2d) {
        if delta.has_nan() {
            warn!(
                "rejected NaN position delta on object {}: ({}, {})",
                self.id, delta.x, delta.y
            );
            return;
        }
        self.position += delta;
    }
}

impl fmt::Display for SituatedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {:?} at ({:.2}, {:.2})", self.kind, name, self.position.x, self.position.y),
            None => write!(f, "{} {} at ({:.2}, {:.2})", self.kind, self.id, self.position.x, self.position.y),
        }
    }
}
