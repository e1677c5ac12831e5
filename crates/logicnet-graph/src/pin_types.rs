//! Pin role inference.
//!
//! Connectors without an intrinsic role get one from what they are wired
//! to: a connector that only sees outputs is an input, a connector that only
//! sees inputs is an output. Connectors that cannot be decided yet are
//! retried until every one is resolved or a round makes no progress.
//!
//! Only typed boundary points are counted; junctions recorded in a
//! dependency set are relays and carry no vote.

use indexmap::IndexMap;
use tracing::{debug, trace};

use logicnet_shapes::{Diagram, GroupRef, PinType, PointId, ShapeId};

use crate::classify::{wire_endpoints, LogicShapes};
use crate::error::{Error, Result};
use crate::pin::PinMap;

/// Resolve the role of every connector and standalone pin.
pub fn infer_pin_types(
    diagram: &Diagram,
    shapes: &LogicShapes,
    dependencies: &PinMap,
) -> Result<IndexMap<PointId, PinType>> {
    let mut inference = Inference {
        diagram,
        dependencies,
        pin_types: IndexMap::new(),
    };

    let pending = inference.first_pass(&shapes.groups)?;
    inference.resolve_pending(pending)?;
    inference.copy_standalone(shapes);

    debug!(pins = inference.pin_types.len(), "pin types resolved");
    Ok(inference.pin_types)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counts {
    none: usize,
    input: usize,
    output: usize,
}

struct Inference<'a> {
    diagram: &'a Diagram,
    dependencies: &'a PinMap,
    pin_types: IndexMap<PointId, PinType>,
}

impl<'a> Inference<'a> {
    /// Assign intrinsic, isolated and directly decidable connectors; return
    /// the rest as `(group, connector)` pairs.
    fn first_pass(&mut self, groups: &[ShapeId]) -> Result<Vec<(ShapeId, PointId)>> {
        let diagram = self.diagram;
        let mut pending = Vec::new();

        for id in groups {
            let Some(group) = diagram.group(*id) else {
                continue;
            };
            for connector in group.connectors() {
                if self.pin_types.contains_key(connector) {
                    continue;
                }

                let intrinsic = self.intrinsic(*connector);
                if intrinsic != PinType::None {
                    self.pin_types.insert(*connector, intrinsic);
                    continue;
                }

                if !self.has_dependencies(*connector) {
                    self.pin_types.insert(*connector, PinType::None);
                    continue;
                }

                match self.decide(group, *connector)? {
                    Some(role) => self.assign(group, *connector, role),
                    None => {
                        self.pin_types.insert(*connector, PinType::None);
                        pending.push((*id, *connector));
                    }
                }
            }
        }

        trace!(pending = pending.len(), "first pass complete");
        Ok(pending)
    }

    /// Retry deferred connectors until none remain.
    fn resolve_pending(&mut self, mut pending: Vec<(ShapeId, PointId)>) -> Result<()> {
        let diagram = self.diagram;
        let mut round = 0;

        while !pending.is_empty() {
            round += 1;
            let mut remaining = Vec::new();

            for (id, connector) in &pending {
                // Promoted by a sibling earlier in this round.
                if self.current(*connector) != PinType::None {
                    continue;
                }
                let Some(group) = diagram.group(*id) else {
                    continue;
                };

                match self.decide(group, *connector)? {
                    Some(role) => self.assign(group, *connector, role),
                    None if self.is_single_consumer(group) => {
                        self.pin_types.insert(*connector, PinType::Output);
                    }
                    None => remaining.push((*id, *connector)),
                }
            }

            trace!(round, before = pending.len(), after = remaining.len(), "pin type round");

            if remaining.len() == pending.len() {
                return Err(Error::UnresolvablePinTypes {
                    points: remaining.into_iter().map(|(_, point)| point).collect(),
                });
            }
            pending = remaining;
        }

        Ok(())
    }

    /// Pins and standalone wire ends keep their intrinsic role.
    fn copy_standalone(&mut self, shapes: &LogicShapes) {
        for pin in &shapes.pins {
            let role = self.intrinsic(*pin);
            self.pin_types.entry(*pin).or_insert(role);
        }

        for wire in &shapes.wires {
            let Ok((start, end)) = wire_endpoints(self.diagram, *wire) else {
                continue;
            };
            for point in [start, end] {
                if self.diagram.point(point).state.is_standalone() {
                    let role = self.intrinsic(point);
                    self.pin_types.entry(point).or_insert(role);
                }
            }
        }
    }

    /// Role implied by a connector's dependencies, `None` when ambiguous.
    fn decide(&self, group: GroupRef<'_>, connector: PointId) -> Result<Option<PinType>> {
        let counts = self.count_dependencies(connector);
        match counts {
            Counts { input: 0, output: 1.., none: 0 } => Ok(Some(PinType::Input)),
            Counts { input: 1.., output: 0, none: 0 } => Ok(Some(PinType::Output)),
            Counts { input: 1.., output: 1.., .. } => Err(Error::ConflictingPinConnection {
                point: connector,
                group: group.name.to_string(),
            }),
            _ => Ok(None),
        }
    }

    /// Record a decided role. A new output turns its undecided siblings into
    /// inputs.
    fn assign(&mut self, group: GroupRef<'_>, connector: PointId, role: PinType) {
        self.pin_types.insert(connector, role);
        if role != PinType::Output {
            return;
        }

        for sibling in group.connectors() {
            if *sibling == connector
                || !self.has_dependencies(*sibling)
                || self.intrinsic(*sibling) != PinType::None
            {
                continue;
            }
            if self.current(*sibling) == PinType::None {
                trace!(%sibling, driver = %connector, "sibling promoted to input");
                self.pin_types.insert(*sibling, PinType::Input);
            }
        }
    }

    /// A group with one wired undecided connector, one input and no output:
    /// the undecided connector is its output.
    fn is_single_consumer(&self, group: GroupRef<'_>) -> bool {
        let mut counts = Counts::default();
        for connector in group.connectors() {
            match self.current(*connector) {
                PinType::None if self.has_dependencies(*connector) => counts.none += 1,
                PinType::None => {}
                PinType::Input => counts.input += 1,
                PinType::Output => counts.output += 1,
            }
        }
        counts == Counts { none: 1, input: 1, output: 0 }
    }

    fn count_dependencies(&self, connector: PointId) -> Counts {
        let mut counts = Counts::default();
        let Some(pins) = self.dependencies.get(&connector) else {
            return counts;
        };
        for pin in pins {
            if self.diagram.point(pin.point).state.is_standalone() {
                continue;
            }
            match self.current(pin.point) {
                PinType::None => counts.none += 1,
                PinType::Input => counts.input += 1,
                PinType::Output => counts.output += 1,
            }
        }
        counts
    }

    fn has_dependencies(&self, connector: PointId) -> bool {
        self.dependencies
            .get(&connector)
            .is_some_and(|pins| !pins.is_empty())
    }

    fn current(&self, point: PointId) -> PinType {
        self.pin_types
            .get(&point)
            .copied()
            .unwrap_or_else(|| self.intrinsic(point))
    }

    fn intrinsic(&self, point: PointId) -> PinType {
        self.diagram.point(point).state.role()
    }
}
