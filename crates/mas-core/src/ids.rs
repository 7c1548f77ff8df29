//! Object identity.
//!
//! Every situated object carries a `ObjectId` — a UUID, so identity stays
//! unique across environments and process runs without coordination.  The
//! nil UUID doubles as the "not yet stamped" sentinel on influences whose
//! emitter is assigned only when the environment consumes them.

use std::fmt;

use uuid::Uuid;

/// Unique identity of a situated object (body, obstacle, marker).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Sentinel meaning "no object" / "not yet stamped".
    pub const NIL: ObjectId = ObjectId(Uuid::nil());

    /// A fresh random (v4) identity.
    pub fn random() -> Self {
        ObjectId(Uuid::new_v4())
    }

    #[inline]
    pub fn is_nil(self) -> bool {
        self.0.is_nil()
    }

    #[inline]
    pub fn as_uuid(self) -> Uuid {
        self.0
    }

    /// Stable 64-bit digest of the identity, for RNG seeding and hashing
    /// into compact keys.
    #[inline]
    pub fn as_u64(self) -> u64 {
        let v = self.0.as_u128();
        (v >> 64) as u64 ^ v as u64
    }
}

impl Default for ObjectId {
    /// Returns the `NIL` sentinel so uninitialized ids are visibly invalid.
    #[inline]
    fn default() -> Self {
        Self::NIL
    }
}

impl From<Uuid> for ObjectId {
    #[inline]
    fn from(id: Uuid) -> Self {
        ObjectId(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
