//! The extracted logic network.

use indexmap::{IndexMap, IndexSet};
use tracing::{info, instrument, trace};

use logicnet_shapes::{Diagram, PinType, PointId, ShapeId};

use crate::classify::LogicShapes;
use crate::connectivity::build_connections;
use crate::dependencies::resolve_dependencies;
use crate::error::Result;
use crate::ordering::order_groups;
use crate::pin::PinMap;
use crate::pin_types::infer_pin_types;

/// Immutable result of one extraction over a diagram snapshot.
///
/// A context is never patched: when the diagram changes, build a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphContext {
    /// Undirected wire adjacency, one entry per logic point.
    pub connections: PinMap,
    /// Reachable points per group connector, through junctions.
    pub dependencies: PinMap,
    /// Resolved role of every connector and wired standalone point.
    pub pin_types: IndexMap<PointId, PinType>,
    /// Groups with drivers before the groups they drive.
    pub ordered_groups: Vec<ShapeId>,
}

impl GraphContext {
    /// Extract the logic network of a whole diagram.
    #[instrument(skip_all)]
    pub fn create(diagram: &Diagram) -> Result<Self> {
        let shapes = LogicShapes::classify(diagram);
        Self::build(diagram, &shapes, shapes.logic_points(diagram), false)
    }

    /// Extract the logic network from explicit groups, pins and wires.
    ///
    /// Logic points are still enumerated from the whole diagram, plus
    /// whatever `shapes` adds.
    #[instrument(skip_all, fields(groups = shapes.groups.len(), wires = shapes.wires.len()))]
    pub fn create_from(diagram: &Diagram, shapes: &LogicShapes) -> Result<Self> {
        let mut logic_points = LogicShapes::classify(diagram).logic_points(diagram);
        logic_points.extend(shapes.logic_points(diagram));
        Self::build(diagram, shapes, logic_points, false)
    }

    /// Like [`GraphContext::create`], but a cyclic group order is accepted
    /// and returned in best-effort order.
    #[instrument(skip_all)]
    pub fn create_ignoring_cycles(diagram: &Diagram) -> Result<Self> {
        let shapes = LogicShapes::classify(diagram);
        Self::build(diagram, &shapes, shapes.logic_points(diagram), true)
    }

    fn build(
        diagram: &Diagram,
        shapes: &LogicShapes,
        logic_points: IndexSet<PointId>,
        ignore_cycles: bool,
    ) -> Result<Self> {
        let connections = build_connections(diagram, &logic_points, &shapes.wires)?;
        let dependencies = resolve_dependencies(diagram, &shapes.groups, &connections);
        let pin_types = infer_pin_types(diagram, shapes, &dependencies)?;
        let ordered_groups =
            order_groups(diagram, &shapes.groups, &dependencies, &pin_types, ignore_cycles)?;

        let context = Self {
            connections,
            dependencies,
            pin_types,
            ordered_groups,
        };

        info!(
            points = context.connections.len(),
            connectors = context.dependencies.len(),
            groups = context.ordered_groups.len(),
            "graph context built"
        );
        context.trace_dump(diagram);

        Ok(context)
    }

    /// Resolved role of a point; points without an entry report their
    /// intrinsic role.
    pub fn pin_type(&self, diagram: &Diagram, point: PointId) -> PinType {
        self.pin_types
            .get(&point)
            .copied()
            .unwrap_or_else(|| diagram.point(point).state.role())
    }

    /// Position of a group in the evaluation order.
    pub fn position(&self, group: ShapeId) -> Option<usize> {
        self.ordered_groups.iter().position(|g| *g == group)
    }

    /// Dump the whole context at trace level.
    pub fn trace_dump(&self, diagram: &Diagram) {
        for (point, pins) in &self.connections {
            trace!(%point, ?pins, "connection");
        }
        for (point, pins) in &self.dependencies {
            trace!(%point, ?pins, "dependency");
        }
        for (point, role) in &self.pin_types {
            trace!(%point, %role, "pin type");
        }
        for (index, group) in self.ordered_groups.iter().enumerate() {
            trace!(index, %group, name = %diagram.shape(*group).name, "ordered group");
        }
    }
}
