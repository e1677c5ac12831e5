//! Core shape types
//!
//! Identifiers, state flags and styles shared by the diagram and the engine.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Style name prefix that marks a shape as a logic wire.
pub const LOGIC_WIRE_PREFIX: &str = "Logic-Wire";

/// Index of a point in a [`Diagram`](crate::Diagram).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Index of a shape in a [`Diagram`](crate::Diagram).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

bitflags! {
    /// Intrinsic state of a point.
    ///
    /// The empty set is the `None` state. A connector may carry a role
    /// (`CONNECTOR | INPUT`); a junction is purely `STANDALONE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct PointState: u32 {
        const INPUT = 1 << 0;
        const OUTPUT = 1 << 1;
        const STANDALONE = 1 << 2;
        const CONNECTOR = 1 << 3;
    }
}

impl PointState {
    /// Role carried by the flags, ignoring `STANDALONE` and `CONNECTOR`.
    ///
    /// A point flagged both `INPUT` and `OUTPUT` reports `Input`.
    pub fn role(&self) -> PinType {
        if self.contains(PointState::INPUT) {
            PinType::Input
        } else if self.contains(PointState::OUTPUT) {
            PinType::Output
        } else {
            PinType::None
        }
    }

    /// Junction points relay connectivity instead of terminating it.
    pub fn is_standalone(&self) -> bool {
        self.contains(PointState::STANDALONE)
    }
}

impl From<PinType> for PointState {
    fn from(role: PinType) -> Self {
        match role {
            PinType::None => PointState::empty(),
            PinType::Input => PointState::INPUT,
            PinType::Output => PointState::OUTPUT,
        }
    }
}

/// Resolved role of a logic point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinType {
    #[default]
    None,
    Input,
    Output,
}

impl PinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinType::None => "none",
            PinType::Input => "input",
            PinType::Output => "output",
        }
    }
}

impl fmt::Display for PinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arrowhead drawn at a line end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowType {
    #[default]
    None,
    Rectangle,
    /// Inverting bubble on a logic wire.
    Ellipse,
    Arrow,
}

/// Stroke style of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub name: String,
    #[serde(default)]
    pub start_arrow: ArrowType,
    #[serde(default)]
    pub end_arrow: ArrowType,
}

impl ShapeStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_arrow: ArrowType::None,
            end_arrow: ArrowType::None,
        }
    }

    /// Plain logic wire style.
    pub fn logic_wire() -> Self {
        Self::new(LOGIC_WIRE_PREFIX)
    }

    /// Logic wire with an inverting bubble at its end.
    pub fn inverted_logic_wire() -> Self {
        Self::logic_wire().with_end_arrow(ArrowType::Ellipse)
    }

    pub fn with_start_arrow(mut self, arrow: ArrowType) -> Self {
        self.start_arrow = arrow;
        self
    }

    pub fn with_end_arrow(mut self, arrow: ArrowType) -> Self {
        self.end_arrow = arrow;
        self
    }

    /// Whether the style name tags a logic wire.
    pub fn is_logic_wire(&self) -> bool {
        self.name.starts_with(LOGIC_WIRE_PREFIX)
    }

    /// Whether either end carries an inverting bubble.
    pub fn is_inverted(&self) -> bool {
        self.start_arrow == ArrowType::Ellipse || self.end_arrow == ArrowType::Ellipse
    }
}
