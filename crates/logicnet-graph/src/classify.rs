//! Logic point classification.
//!
//! Projects a diagram onto the three collections the rest of the pipeline
//! works with: groups, standalone pins and logic wires.

use indexmap::IndexSet;
use tracing::debug;

use logicnet_shapes::{Diagram, PointId, ShapeId, ShapeKind};

use crate::error::{Error, Result};

/// Groups, standalone pins and logic wires of a diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicShapes {
    pub groups: Vec<ShapeId>,
    pub pins: Vec<PointId>,
    pub wires: Vec<ShapeId>,
}

impl LogicShapes {
    /// Classify every shape of the diagram, group contents included.
    pub fn classify(diagram: &Diagram) -> Self {
        let mut shapes = Self::default();

        for id in diagram.walk() {
            let shape = diagram.shape(id);
            match &shape.kind {
                ShapeKind::Group(_) => shapes.groups.push(id),
                ShapeKind::Point { point } => {
                    if diagram.point(*point).state.is_standalone() {
                        shapes.pins.push(*point);
                    }
                }
                ShapeKind::Line { .. }
                | ShapeKind::CubicBezier { .. }
                | ShapeKind::QuadraticBezier { .. } => {
                    if shape.style.is_logic_wire() {
                        shapes.wires.push(id);
                    }
                }
                ShapeKind::Ellipse { .. } | ShapeKind::Rectangle { .. } => {}
            }
        }

        debug!(
            groups = shapes.groups.len(),
            pins = shapes.pins.len(),
            wires = shapes.wires.len(),
            "shapes classified"
        );

        shapes
    }

    /// Every logic point: group connectors, wire endpoints, standalone pins.
    ///
    /// Wires that are not wire-shaped contribute nothing here; they are
    /// rejected when connections are built.
    pub fn logic_points(&self, diagram: &Diagram) -> IndexSet<PointId> {
        let mut points = IndexSet::new();

        for group in &self.groups {
            if let Some(group) = diagram.group(*group) {
                points.extend(group.connectors().iter().copied());
            }
        }

        for wire in &self.wires {
            if let Ok((start, end)) = wire_endpoints(diagram, *wire) {
                points.insert(start);
                points.insert(end);
            }
        }

        points.extend(self.pins.iter().copied());
        points
    }
}

/// The two ends of a wire: start/end of a line, first/last control point of
/// a curve.
pub fn wire_endpoints(diagram: &Diagram, wire: ShapeId) -> Result<(PointId, PointId)> {
    match diagram.shape(wire).kind {
        ShapeKind::Line { start, end } => Ok((start, end)),
        ShapeKind::CubicBezier { point1, point4, .. } => Ok((point1, point4)),
        ShapeKind::QuadraticBezier { point1, point3, .. } => Ok((point1, point3)),
        ref other => Err(Error::InvalidWireType {
            shape: wire,
            kind: other.type_name(),
        }),
    }
}
