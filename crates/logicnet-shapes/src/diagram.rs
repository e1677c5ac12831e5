//! Diagram arenas
//!
//! Points and shapes live in two vectors indexed by [`PointId`] and
//! [`ShapeId`]. Ids are handed out by the builder methods and stay valid for
//! the lifetime of the diagram; nothing is ever removed.

use indexmap::IndexMap;

use crate::types::{PinType, PointId, PointState, ShapeId, ShapeStyle};

/// A point owned by exactly one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub state: PointState,
    pub owner: ShapeId,
}

/// Composite shape exposing connectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// Connector points in declaration order.
    pub connectors: Vec<PointId>,
    /// Child shapes.
    pub shapes: Vec<ShapeId>,
    /// Free-form key/value data, e.g. timer delays.
    pub properties: IndexMap<String, String>,
}

/// Shape subtype and the points it references.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Point {
        point: PointId,
    },
    Line {
        start: PointId,
        end: PointId,
    },
    CubicBezier {
        point1: PointId,
        point2: PointId,
        point3: PointId,
        point4: PointId,
    },
    QuadraticBezier {
        point1: PointId,
        point2: PointId,
        point3: PointId,
    },
    Ellipse {
        top_left: PointId,
        bottom_right: PointId,
    },
    Rectangle {
        top_left: PointId,
        bottom_right: PointId,
    },
    Group(Group),
}

impl ShapeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Point { .. } => "point",
            ShapeKind::Line { .. } => "line",
            ShapeKind::CubicBezier { .. } => "cubic-bezier",
            ShapeKind::QuadraticBezier { .. } => "quadratic-bezier",
            ShapeKind::Ellipse { .. } => "ellipse",
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Group(_) => "group",
        }
    }
}

/// A shape in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    /// Display name. For groups this is also the simulation type key.
    pub name: String,
    pub style: ShapeStyle,
    pub parent: Option<ShapeId>,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    fn as_group_mut(&mut self) -> Option<&mut Group> {
        match &mut self.kind {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// Borrowed view of a group shape.
#[derive(Debug, Clone, Copy)]
pub struct GroupRef<'a> {
    pub id: ShapeId,
    pub name: &'a str,
    pub group: &'a Group,
}

impl<'a> GroupRef<'a> {
    pub fn connectors(&self) -> &'a [PointId] {
        &self.group.connectors
    }

    pub fn property(&self, key: &str) -> Option<&'a str> {
        self.group.properties.get(key).map(String::as_str)
    }
}

/// Where a new line end goes: onto an existing point, or a fresh point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    Point(PointId),
    At(f64, f64),
}

impl From<PointId> for Endpoint {
    fn from(id: PointId) -> Self {
        Endpoint::Point(id)
    }
}

impl From<(f64, f64)> for Endpoint {
    fn from((x, y): (f64, f64)) -> Self {
        Endpoint::At(x, y)
    }
}

/// A diagram: point and shape arenas plus the root shape list.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    points: Vec<Point>,
    shapes: Vec<Shape>,
    roots: Vec<ShapeId>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a point.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this diagram.
    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id.0]
    }

    /// Get a shape.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this diagram.
    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0]
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Top-level shapes in insertion order.
    pub fn roots(&self) -> &[ShapeId] {
        &self.roots
    }

    /// Group view of a shape, if it is a group.
    pub fn group(&self, id: ShapeId) -> Option<GroupRef<'_>> {
        let shape = self.shapes.get(id.0)?;
        shape.as_group().map(|group| GroupRef {
            id,
            name: &shape.name,
            group,
        })
    }

    /// Owning group of a point, if the owner is a group.
    pub fn owner_group(&self, point: PointId) -> Option<ShapeId> {
        let owner = self.point(point).owner;
        self.shape(owner).as_group().map(|_| owner)
    }

    /// All shapes in depth-first tree order, group contents after the group.
    pub fn walk(&self) -> Vec<ShapeId> {
        let mut order = Vec::with_capacity(self.shapes.len());
        let mut stack: Vec<ShapeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(group) = self.shape(id).as_group() {
                stack.extend(group.shapes.iter().rev().copied());
            }
        }
        order
    }

    /// Add an empty top-level group.
    pub fn add_group(&mut self, name: impl Into<String>) -> ShapeId {
        self.push_shape(name.into(), ShapeStyle::default(), |_| {
            ShapeKind::Group(Group::default())
        })
    }

    /// Add a connector to a group.
    ///
    /// # Panics
    ///
    /// Panics if `group` is not a group shape.
    pub fn add_connector(&mut self, group: ShapeId, x: f64, y: f64, role: PinType) -> PointId {
        let point = self.push_point(x, y, PointState::CONNECTOR | role.into(), group);
        self.group_mut(group).connectors.push(point);
        point
    }

    /// Set a group property.
    ///
    /// # Panics
    ///
    /// Panics if `group` is not a group shape.
    pub fn set_property(&mut self, group: ShapeId, key: impl Into<String>, value: impl Into<String>) {
        self.group_mut(group).properties.insert(key.into(), value.into());
    }

    /// Add a top-level point shape with the given state.
    pub fn add_point(&mut self, x: f64, y: f64, state: PointState) -> PointId {
        let mut point = PointId(0);
        self.push_shape(String::from("point"), ShapeStyle::default(), |diagram| {
            let shape = ShapeId(diagram.shapes.len());
            point = diagram.push_point(x, y, state, shape);
            ShapeKind::Point { point }
        });
        point
    }

    /// Add a top-level standalone junction.
    pub fn add_junction(&mut self, x: f64, y: f64) -> PointId {
        self.add_point(x, y, PointState::STANDALONE)
    }

    pub fn add_line(
        &mut self,
        style: ShapeStyle,
        start: impl Into<Endpoint>,
        end: impl Into<Endpoint>,
    ) -> ShapeId {
        let (start, end) = (start.into(), end.into());
        self.push_shape(String::from("line"), style, |diagram| {
            let shape = ShapeId(diagram.shapes.len());
            ShapeKind::Line {
                start: diagram.resolve_endpoint(start, shape),
                end: diagram.resolve_endpoint(end, shape),
            }
        })
    }

    pub fn add_cubic_bezier(
        &mut self,
        style: ShapeStyle,
        start: impl Into<Endpoint>,
        control1: (f64, f64),
        control2: (f64, f64),
        end: impl Into<Endpoint>,
    ) -> ShapeId {
        let (start, end) = (start.into(), end.into());
        self.push_shape(String::from("cubic-bezier"), style, |diagram| {
            let shape = ShapeId(diagram.shapes.len());
            ShapeKind::CubicBezier {
                point1: diagram.resolve_endpoint(start, shape),
                point2: diagram.push_point(control1.0, control1.1, PointState::empty(), shape),
                point3: diagram.push_point(control2.0, control2.1, PointState::empty(), shape),
                point4: diagram.resolve_endpoint(end, shape),
            }
        })
    }

    pub fn add_quadratic_bezier(
        &mut self,
        style: ShapeStyle,
        start: impl Into<Endpoint>,
        control: (f64, f64),
        end: impl Into<Endpoint>,
    ) -> ShapeId {
        let (start, end) = (start.into(), end.into());
        self.push_shape(String::from("quadratic-bezier"), style, |diagram| {
            let shape = ShapeId(diagram.shapes.len());
            ShapeKind::QuadraticBezier {
                point1: diagram.resolve_endpoint(start, shape),
                point2: diagram.push_point(control.0, control.1, PointState::empty(), shape),
                point3: diagram.resolve_endpoint(end, shape),
            }
        })
    }

    pub fn add_ellipse(&mut self, style: ShapeStyle, top_left: (f64, f64), bottom_right: (f64, f64)) -> ShapeId {
        self.push_shape(String::from("ellipse"), style, |diagram| {
            let shape = ShapeId(diagram.shapes.len());
            ShapeKind::Ellipse {
                top_left: diagram.push_point(top_left.0, top_left.1, PointState::empty(), shape),
                bottom_right: diagram.push_point(bottom_right.0, bottom_right.1, PointState::empty(), shape),
            }
        })
    }

    pub fn add_rectangle(&mut self, style: ShapeStyle, top_left: (f64, f64), bottom_right: (f64, f64)) -> ShapeId {
        self.push_shape(String::from("rectangle"), style, |diagram| {
            let shape = ShapeId(diagram.shapes.len());
            ShapeKind::Rectangle {
                top_left: diagram.push_point(top_left.0, top_left.1, PointState::empty(), shape),
                bottom_right: diagram.push_point(bottom_right.0, bottom_right.1, PointState::empty(), shape),
            }
        })
    }

    /// Move a shape into a group's children.
    ///
    /// # Panics
    ///
    /// Panics if `group` is not a group shape or `shape == group`.
    pub fn nest(&mut self, shape: ShapeId, group: ShapeId) {
        assert_ne!(shape, group, "a group cannot contain itself");
        match self.shapes[shape.0].parent {
            Some(previous) => self.group_mut(previous).shapes.retain(|s| *s != shape),
            None => self.roots.retain(|s| *s != shape),
        }
        self.group_mut(group).shapes.push(shape);
        self.shapes[shape.0].parent = Some(group);
    }

    fn push_shape(
        &mut self,
        name: String,
        style: ShapeStyle,
        build: impl FnOnce(&mut Self) -> ShapeKind,
    ) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        let kind = build(self);
        self.shapes.push(Shape {
            id,
            name,
            style,
            parent: None,
            kind,
        });
        self.roots.push(id);
        id
    }

    fn push_point(&mut self, x: f64, y: f64, state: PointState, owner: ShapeId) -> PointId {
        let id = PointId(self.points.len());
        self.points.push(Point { x, y, state, owner });
        id
    }

    fn resolve_endpoint(&mut self, endpoint: Endpoint, owner: ShapeId) -> PointId {
        match endpoint {
            Endpoint::Point(id) => id,
            Endpoint::At(x, y) => self.push_point(x, y, PointState::empty(), owner),
        }
    }

    fn group_mut(&mut self, id: ShapeId) -> &mut Group {
        let shape = &mut self.shapes[id.0];
        let name = shape.kind.type_name();
        match shape.as_group_mut() {
            Some(group) => group,
            None => panic!("shape {id} is a {name}, not a group"),
        }
    }
}
