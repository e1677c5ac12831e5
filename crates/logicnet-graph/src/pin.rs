//! Pins: directed references to logic points.

use indexmap::{IndexMap, IndexSet};

use logicnet_shapes::PointId;

/// A reference to a logic point, reached over a wire that may invert.
///
/// Two pins are equal when both the point and the inversion flag match, so a
/// point reached once plainly and once through an inverting wire appears
/// twice in a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pin {
    pub point: PointId,
    pub inverted: bool,
}

impl Pin {
    pub fn new(point: PointId, inverted: bool) -> Self {
        Self { point, inverted }
    }
}

/// Point → pin set, in discovery order.
pub type PinMap = IndexMap<PointId, IndexSet<Pin>>;
