//! Group evaluation order.
//!
//! A group drives every group owning an input-typed point in the dependency
//! sets of its connectors. Drivers are evaluated before the groups they
//! drive.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use logicnet_shapes::{Diagram, PinType, PointId, ShapeId};

use crate::error::{Error, Result};
use crate::pin::PinMap;
use crate::topology::topological_sort;

/// Groups driven by `group`, in discovery order.
pub fn driven_groups(
    diagram: &Diagram,
    group: ShapeId,
    dependencies: &PinMap,
    pin_types: &IndexMap<PointId, PinType>,
) -> IndexSet<ShapeId> {
    let mut driven = IndexSet::new();
    let Some(group) = diagram.group(group) else {
        return driven;
    };

    for connector in group.connectors() {
        let Some(pins) = dependencies.get(connector) else {
            continue;
        };
        for pin in pins {
            if pin_types.get(&pin.point) != Some(&PinType::Input) {
                continue;
            }
            if let Some(owner) = diagram.owner_group(pin.point) {
                driven.insert(owner);
            }
        }
    }

    driven
}

/// Order groups so that every group precedes the groups it drives.
pub fn order_groups(
    diagram: &Diagram,
    groups: &[ShapeId],
    dependencies: &PinMap,
    pin_types: &IndexMap<PointId, PinType>,
    ignore_cycles: bool,
) -> Result<Vec<ShapeId>> {
    let postorder = topological_sort(
        groups,
        |group| driven_groups(diagram, *group, dependencies, pin_types),
        ignore_cycles,
    )
    .map_err(|cycle| Error::DependencyCycle {
        groups: cycle
            .involved
            .iter()
            .map(|group| diagram.shape(*group).name.clone())
            .collect(),
        shapes: cycle.involved,
    })?;

    let ordered: Vec<ShapeId> = postorder.into_iter().rev().collect();
    debug!(groups = ordered.len(), "evaluation order built");
    Ok(ordered)
}
