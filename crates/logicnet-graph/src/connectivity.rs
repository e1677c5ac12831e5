//! Wire connectivity.

use indexmap::IndexSet;
use tracing::trace;

use logicnet_shapes::{Diagram, PointId, ShapeId};

use crate::classify::wire_endpoints;
use crate::error::Result;
use crate::pin::{Pin, PinMap};

/// Build the undirected adjacency between logic points.
///
/// Every logic point is a key, connected or not. Each wire adds a pin to the
/// opposite end at both of its endpoints; the pin is inverted when the wire
/// style carries an ellipse arrowhead at either end.
pub fn build_connections(
    diagram: &Diagram,
    logic_points: &IndexSet<PointId>,
    wires: &[ShapeId],
) -> Result<PinMap> {
    let mut connections: PinMap = logic_points
        .iter()
        .map(|point| (*point, IndexSet::new()))
        .collect();

    for wire in wires {
        let (start, end) = wire_endpoints(diagram, *wire)?;
        let inverted = diagram.shape(*wire).style.is_inverted();
        trace!(%wire, %start, %end, inverted, "wire connected");

        connections
            .entry(start)
            .or_default()
            .insert(Pin::new(end, inverted));
        connections
            .entry(end)
            .or_default()
            .insert(Pin::new(start, inverted));
    }

    Ok(connections)
}
