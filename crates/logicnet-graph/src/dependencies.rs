//! Connector dependency resolution.
//!
//! Standalone junctions relay connectivity; every other point is a typed
//! boundary where the walk stops. The dependency set of a connector is
//! everything it can reach that way, junctions included.

use std::collections::HashSet;

use indexmap::IndexSet;
use tracing::debug;

use logicnet_shapes::{Diagram, PointId, ShapeId};

use crate::pin::{Pin, PinMap};

/// Compute the dependency set of every connector of every group.
pub fn resolve_dependencies(diagram: &Diagram, groups: &[ShapeId], connections: &PinMap) -> PinMap {
    let mut dependencies = PinMap::new();

    for group in groups {
        let Some(group) = diagram.group(*group) else {
            continue;
        };
        for connector in group.connectors() {
            let mut walk = Walk {
                diagram,
                connections,
                start: *connector,
                queued: HashSet::from([*connector]),
                found: IndexSet::new(),
            };
            walk.visit(*connector);
            dependencies.insert(*connector, walk.found);
        }
    }

    debug!(
        connectors = dependencies.len(),
        pins = dependencies.values().map(IndexSet::len).sum::<usize>(),
        "dependencies resolved"
    );

    dependencies
}

struct Walk<'a> {
    diagram: &'a Diagram,
    connections: &'a PinMap,
    start: PointId,
    /// Junctions already walked from, so cycles through junctions terminate.
    queued: HashSet<PointId>,
    found: IndexSet<Pin>,
}

impl Walk<'_> {
    fn visit(&mut self, current: PointId) {
        let Some(pins) = self.connections.get(&current) else {
            return;
        };
        for pin in pins {
            if pin.point == self.start {
                continue;
            }
            self.found.insert(*pin);
            if self.diagram.point(pin.point).state.is_standalone() && self.queued.insert(pin.point) {
                self.visit(pin.point);
            }
        }
    }
}
