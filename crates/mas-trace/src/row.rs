//! Plain data row types written by trace backends.

use mas_body::Percept;
use mas_core::ObjectId;
use mas_object::ObjectKind;

/// One object's pose at one event time.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    /// Virtual time in seconds of the event that produced this row.
    pub time: f64,
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Blank in the file when the object is unnamed.
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Orientation in radians.
    pub angle: f64,
    /// Realized linear speed in units per second.
    pub speed: f64,
}

impl SnapshotRow {
    /// Flatten one percept out of an event snapshot.
    pub fn new(time: f64, percept: &Percept) -> Self {
        Self {
            time,
            id: percept.id,
            kind: percept.kind,
            name: percept.name.clone(),
            x: percept.position.x,
            y: percept.position.y,
            angle: percept.angle,
            speed: percept.linear_motion.length(),
        }
    }
}
