//! Diagram documents
//!
//! A YAML description of a logic diagram: groups with connectors, standalone
//! junctions and wires. Wire ends refer to connectors as `group.connector`
//! and to junctions by id; an omitted end becomes a dangling point owned by
//! the wire.
//!
//! ```yaml
//! groups:
//!   - id: sw
//!     name: SWITCH
//!     connectors:
//!       - { id: q, role: output }
//!   - id: inv
//!     name: NOT
//!     connectors:
//!       - { id: in, role: input }
//!       - { id: out, role: output }
//! wires:
//!   - { from: sw.q, to: inv.in }
//! ```

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagram::{Diagram, Endpoint};
use crate::error::{DocumentError, DocumentResult};
use crate::types::{ArrowType, PinType, PointId, ShapeId, ShapeStyle, LOGIC_WIRE_PREFIX};

/// Root of a diagram document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramDocument {
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
    #[serde(default)]
    pub junctions: Vec<JunctionSpec>,
    #[serde(default)]
    pub wires: Vec<WireSpec>,
}

/// A group and its connectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Document-local id, unique across groups and junctions.
    pub id: String,
    /// Display name and simulation type key.
    pub name: String,
    #[serde(default)]
    pub connectors: Vec<ConnectorSpec>,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
    /// Enclosing group id.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub at: [f64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    pub id: String,
    #[serde(default)]
    pub role: PinType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunctionSpec {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub at: [f64; 2],
}

/// Geometry used to draw a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireKind {
    #[default]
    Line,
    CubicBezier,
    QuadraticBezier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSpec {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub kind: WireKind,
    #[serde(default = "default_wire_style")]
    pub style: String,
    #[serde(default)]
    pub start_arrow: ArrowType,
    #[serde(default)]
    pub end_arrow: ArrowType,
    #[serde(default)]
    pub parent: Option<String>,
}

fn default_wire_style() -> String {
    LOGIC_WIRE_PREFIX.to_string()
}

/// A built diagram plus the document ids that produced it.
#[derive(Debug, Clone, Default)]
pub struct LoadedDiagram {
    pub diagram: Diagram,
    /// Group id → group shape.
    pub groups: IndexMap<String, ShapeId>,
    /// `group.connector` and junction id → point.
    pub points: IndexMap<String, PointId>,
    /// Wire shapes in document order.
    pub wires: Vec<ShapeId>,
}

impl LoadedDiagram {
    pub fn group(&self, id: &str) -> Option<ShapeId> {
        self.groups.get(id).copied()
    }

    pub fn point(&self, id: &str) -> Option<PointId> {
        self.points.get(id).copied()
    }
}

impl DiagramDocument {
    /// Parse a document from YAML source.
    pub fn from_yaml(source: &str) -> DocumentResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Read and parse a document file.
    pub fn load(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&source)
    }

    /// Build the diagram arenas.
    pub fn build(&self) -> DocumentResult<LoadedDiagram> {
        let mut loaded = LoadedDiagram::default();
        let mut parents: Vec<(ShapeId, String, &Option<String>)> = Vec::new();

        for spec in &self.groups {
            if loaded.groups.contains_key(&spec.id) || loaded.points.contains_key(&spec.id) {
                return Err(DocumentError::DuplicateId(spec.id.clone()));
            }
            let group = loaded.diagram.add_group(spec.name.clone());
            for (index, connector) in spec.connectors.iter().enumerate() {
                let key = format!("{}.{}", spec.id, connector.id);
                if loaded.points.contains_key(&key) {
                    return Err(DocumentError::DuplicateId(key));
                }
                let y = spec.at[1] + 20.0 * index as f64;
                let point = loaded.diagram.add_connector(group, spec.at[0], y, connector.role);
                loaded.points.insert(key, point);
            }
            for (key, value) in &spec.properties {
                loaded.diagram.set_property(group, key.clone(), value.clone());
            }
            loaded.groups.insert(spec.id.clone(), group);
            parents.push((group, spec.id.clone(), &spec.parent));
        }

        for spec in &self.junctions {
            if loaded.groups.contains_key(&spec.id) || loaded.points.contains_key(&spec.id) {
                return Err(DocumentError::DuplicateId(spec.id.clone()));
            }
            let point = loaded.diagram.add_junction(spec.at[0], spec.at[1]);
            loaded.points.insert(spec.id.clone(), point);
            let shape = loaded.diagram.point(point).owner;
            parents.push((shape, spec.id.clone(), &spec.parent));
        }

        for (index, spec) in self.wires.iter().enumerate() {
            let start = resolve_end(&loaded, spec.from.as_deref(), (0.0, 0.0))?;
            let end = resolve_end(&loaded, spec.to.as_deref(), (0.0, 0.0))?;
            let style = ShapeStyle::new(spec.style.clone())
                .with_start_arrow(spec.start_arrow)
                .with_end_arrow(spec.end_arrow);
            let wire = match spec.kind {
                WireKind::Line => loaded.diagram.add_line(style, start, end),
                WireKind::CubicBezier => {
                    loaded
                        .diagram
                        .add_cubic_bezier(style, start, (0.0, 0.0), (0.0, 0.0), end)
                }
                WireKind::QuadraticBezier => {
                    loaded.diagram.add_quadratic_bezier(style, start, (0.0, 0.0), end)
                }
            };
            loaded.wires.push(wire);
            parents.push((wire, format!("wire #{index}"), &spec.parent));
        }

        check_parent_cycles(&self.groups)?;
        for (shape, name, parent) in parents {
            let Some(parent) = parent else { continue };
            let group = loaded
                .groups
                .get(parent)
                .copied()
                .filter(|group| *group != shape)
                .ok_or_else(|| DocumentError::UnknownParent {
                    shape: name.clone(),
                    parent: parent.clone(),
                })?;
            loaded.diagram.nest(shape, group);
        }

        debug!(
            groups = loaded.groups.len(),
            points = loaded.points.len(),
            wires = loaded.wires.len(),
            "diagram document built"
        );

        Ok(loaded)
    }
}

/// Reject group parent chains that loop back on themselves.
fn check_parent_cycles(groups: &[GroupSpec]) -> DocumentResult<()> {
    let parents: IndexMap<&str, &str> = groups
        .iter()
        .filter_map(|group| Some((group.id.as_str(), group.parent.as_deref()?)))
        .collect();

    for spec in groups {
        let mut seen = HashSet::from([spec.id.as_str()]);
        let mut current = spec.parent.as_deref();
        while let Some(parent) = current {
            if !seen.insert(parent) {
                return Err(DocumentError::ParentCycle(parent.to_string()));
            }
            current = parents.get(parent).copied();
        }
    }
    Ok(())
}

fn resolve_end(
    loaded: &LoadedDiagram,
    reference: Option<&str>,
    fallback: (f64, f64),
) -> DocumentResult<Endpoint> {
    match reference {
        Some(name) => loaded
            .point(name)
            .map(Endpoint::Point)
            .ok_or_else(|| DocumentError::UnknownPoint(name.to_string())),
        None => Ok(Endpoint::At(fallback.0, fallback.1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::ShapeKind;

    const NOT_GATE: &str = r#"
        groups:
          - id: sw
            name: SWITCH
            connectors:
              - { id: q, role: output }
          - id: inv
            name: NOT
            connectors:
              - { id: in, role: input }
              - { id: out, role: output }
        wires:
          - { from: sw.q, to: inv.in }
    "#;

    #[test]
    fn test_build_shares_connector_points() {
        let loaded = DiagramDocument::from_yaml(NOT_GATE).unwrap().build().unwrap();
        let q = loaded.point("sw.q").unwrap();
        let input = loaded.point("inv.in").unwrap();

        let ShapeKind::Line { start, end } = loaded.diagram.shape(loaded.wires[0]).kind else {
            panic!("expected a line");
        };
        assert_eq!((start, end), (q, input));
        assert!(loaded.diagram.shape(loaded.wires[0]).style.is_logic_wire());
        assert_eq!(loaded.diagram.shape(loaded.group("inv").unwrap()).name, "NOT");
    }

    #[test]
    fn test_missing_end_is_dangling() {
        let source = r#"
            groups:
              - id: g
                name: BUFFER
                connectors: [{ id: a }]
            wires:
              - { from: g.a, end_arrow: ellipse, kind: quadratic-bezier }
        "#;
        let loaded = DiagramDocument::from_yaml(source).unwrap().build().unwrap();
        let wire = loaded.diagram.shape(loaded.wires[0]);
        let ShapeKind::QuadraticBezier { point3, .. } = wire.kind else {
            panic!("expected a quadratic bezier");
        };
        assert_eq!(loaded.diagram.point(point3).owner, wire.id);
        assert!(wire.style.is_inverted());
    }

    #[test]
    fn test_unknown_reference() {
        let source = r#"
            wires:
              - { from: nowhere.q }
        "#;
        let err = DiagramDocument::from_yaml(source).unwrap().build().unwrap_err();
        assert!(matches!(err, DocumentError::UnknownPoint(name) if name == "nowhere.q"));
    }

    #[test]
    fn test_duplicate_id() {
        let source = r#"
            groups:
              - { id: a, name: AND }
            junctions:
              - { id: a }
        "#;
        let err = DiagramDocument::from_yaml(source).unwrap().build().unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_nesting_by_parent() {
        let source = r#"
            groups:
              - { id: outer, name: MODULE }
            junctions:
              - { id: j, parent: outer }
        "#;
        let loaded = DiagramDocument::from_yaml(source).unwrap().build().unwrap();
        let outer = loaded.group("outer").unwrap();
        let junction_shape = loaded.diagram.point(loaded.point("j").unwrap()).owner;
        assert_eq!(loaded.diagram.shape(junction_shape).parent, Some(outer));
    }

    #[test]
    fn test_unknown_parent() {
        let source = r#"
            junctions:
              - { id: j, parent: missing }
        "#;
        let err = DiagramDocument::from_yaml(source).unwrap().build().unwrap_err();
        assert!(matches!(err, DocumentError::UnknownParent { parent, .. } if parent == "missing"));
    }

    #[test]
    fn test_mutual_parents_rejected() {
        let source = r#"
            groups:
              - { id: a, name: AND, parent: b }
              - { id: b, name: OR, parent: a }
        "#;
        let err = DiagramDocument::from_yaml(source).unwrap().build().unwrap_err();
        assert!(matches!(err, DocumentError::ParentCycle(id) if id == "a"));
    }

    #[test]
    fn test_longer_parent_cycle_rejected() {
        let source = r#"
            groups:
              - { id: top, name: MODULE, parent: inner }
              - { id: mid, name: MODULE, parent: top }
              - { id: inner, name: MODULE, parent: mid }
              - { id: leaf, name: NOT, parent: inner }
        "#;
        let err = DiagramDocument::from_yaml(source).unwrap().build().unwrap_err();
        assert!(matches!(err, DocumentError::ParentCycle(_)));
    }

    #[test]
    fn test_nested_groups_stay_reachable() {
        let source = r#"
            groups:
              - { id: outer, name: MODULE }
              - { id: inner, name: NOT, parent: outer }
        "#;
        let loaded = DiagramDocument::from_yaml(source).unwrap().build().unwrap();
        let outer = loaded.group("outer").unwrap();
        let inner = loaded.group("inner").unwrap();
        assert_eq!(loaded.diagram.roots(), &[outer]);
        assert_eq!(loaded.diagram.walk(), vec![outer, inner]);
    }
}
