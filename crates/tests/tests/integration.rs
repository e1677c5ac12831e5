//! Integration tests for end-to-end logicnet execution.
//!
//! These tests verify the full pipeline:
//! Load document → Extract graph → Instantiate → Step → Verify

use logicnet_graph::Error;
use logicnet_shapes::PinType;
use logicnet_sim::{BoolInput, SimulationRegistry};
use logicnet_tests::{TestHarness, extract, load};

const SWITCH_NOT: &str = r#"
groups:
  - id: not
    name: NOT
    connectors:
      - { id: in, role: input }
      - { id: out, role: output }
  - id: switch
    name: SWITCH
    connectors:
      - { id: q, role: output }
wires:
  - { from: switch.q, to: not.in }
"#;

/// SWITCH.q drives NOT.in; the switch runs first and feeds the inverter.
#[test]
fn test_switch_not_end_to_end() {
    let mut harness = TestHarness::from_yaml(SWITCH_NOT);

    assert_eq!(harness.pin_type("switch.q"), PinType::Output);
    assert_eq!(harness.pin_type("not.in"), PinType::Input);
    assert_eq!(harness.order(), vec!["switch", "not"]);

    let switch = harness.loaded().group("switch").unwrap();
    let not = harness.loaded().group("not").unwrap();
    let switch_sim = harness.simulations().id(switch).unwrap();
    assert_eq!(
        harness.simulations().inputs(not).unwrap(),
        &[BoolInput::new(switch_sim, false)]
    );

    harness.tick();
    assert_eq!(harness.state("not"), Some(true));

    harness.set_state("switch", Some(true));
    harness.tick();
    assert_eq!(harness.state("not"), Some(false));
}

/// Untyped connectors take their roles from what they are wired to.
#[test]
fn test_roles_inferred_through_junctions() {
    let source = r#"
groups:
  - id: a
    name: SWITCH
    connectors:
      - { id: q, role: output }
  - id: b
    name: SWITCH
    connectors:
      - { id: q, role: output }
  - id: gate
    name: AND
    connectors:
      - { id: x }
      - { id: y }
      - { id: out }
  - id: lamp
    name: BUFFER
    connectors:
      - { id: in, role: input }
      - { id: out, role: output }
junctions:
  - { id: tap }
wires:
  - { from: a.q, to: tap }
  - { from: tap, to: gate.x }
  - { from: b.q, to: gate.y, end_arrow: ellipse }
  - { from: gate.out, to: lamp.in }
"#;
    let mut harness = TestHarness::from_yaml(source);

    assert_eq!(harness.pin_type("gate.x"), PinType::Input);
    assert_eq!(harness.pin_type("gate.y"), PinType::Input);
    assert_eq!(harness.pin_type("gate.out"), PinType::Output);
    assert_eq!(harness.pin_type("tap"), PinType::None);

    let order = harness.order();
    let position = |id: &str| order.iter().position(|g| *g == id).unwrap();
    assert!(position("a") < position("gate"));
    assert!(position("b") < position("gate"));
    assert!(position("gate") < position("lamp"));

    // y is inverted: a=1, b=0 gives 1 AND 1
    harness.set_state("a", Some(true));
    harness.tick();
    assert_eq!(harness.state("lamp"), Some(true));

    harness.set_state("b", Some(true));
    harness.tick();
    assert_eq!(harness.state("lamp"), Some(false));
}

/// An on-delay timer latches a set-dominant flip-flop until reset.
#[test]
fn test_timer_into_latch() {
    let source = r#"
groups:
  - id: start
    name: SWITCH
    connectors:
      - { id: q, role: output }
  - id: reset
    name: SWITCH
    connectors:
      - { id: q, role: output }
  - id: delay
    name: TIMER-ON
    properties: { delay: "0.3" }
    connectors:
      - { id: in, role: input }
      - { id: out, role: output }
  - id: latch
    name: SR-SET
    connectors:
      - { id: s, role: input }
      - { id: r, role: input }
      - { id: q, role: output }
wires:
  - { from: start.q, to: delay.in }
  - { from: delay.out, to: latch.s }
  - { from: reset.q, to: latch.r }
"#;
    let mut harness = TestHarness::from_yaml(source);

    harness.set_state("start", Some(true));
    harness.run_ticks(3);
    assert_eq!(harness.state("latch"), Some(false));
    harness.tick();
    assert_eq!(harness.state("delay"), Some(true));
    assert_eq!(harness.state("latch"), Some(true));

    harness.set_state("start", Some(false));
    harness.run_ticks(2);
    assert_eq!(harness.state("delay"), Some(false));
    assert_eq!(harness.state("latch"), Some(true));

    harness.set_state("reset", Some(true));
    harness.tick();
    assert_eq!(harness.state("latch"), Some(false));
    assert_eq!(harness.cycle(), 7);
}

/// One connector wired to both an input and an output is rejected.
#[test]
fn test_conflicting_wiring_rejected() {
    let source = r#"
groups:
  - id: sw
    name: SWITCH
    connectors:
      - { id: q, role: output }
  - id: inv
    name: NOT
    connectors:
      - { id: in, role: input }
  - id: buf
    name: BUFFER
    connectors:
      - { id: a }
junctions:
  - { id: j }
wires:
  - { from: sw.q, to: j }
  - { from: inv.in, to: j }
  - { from: buf.a, to: j }
"#;
    let err = extract(source).unwrap_err();
    assert!(matches!(err, Error::ConflictingPinConnection { ref group, .. } if group == "BUFFER"));
}

/// Three groups each driving the next form a cycle.
#[test]
fn test_feedback_loop_rejected() {
    let source = r#"
groups:
  - id: a
    name: NOT
    connectors:
      - { id: in, role: input }
      - { id: out, role: output }
  - id: b
    name: NOT
    connectors:
      - { id: in, role: input }
      - { id: out, role: output }
  - id: c
    name: NOT
    connectors:
      - { id: in, role: input }
      - { id: out, role: output }
wires:
  - { from: a.out, to: b.in }
  - { from: b.out, to: c.in }
  - { from: c.out, to: a.in }
"#;
    let err = extract(source).unwrap_err();
    match err {
        Error::DependencyCycle { groups, .. } => assert_eq!(groups, vec!["NOT"; 4]),
        other => panic!("unexpected error: {other}"),
    }
}

/// Extraction is deterministic for an unchanged document.
#[test]
fn test_extraction_is_repeatable() {
    let first = extract(SWITCH_NOT).unwrap();
    let second = extract(SWITCH_NOT).unwrap();
    assert_eq!(first.pin_types, second.pin_types);
    assert_eq!(first.ordered_groups, second.ordered_groups);
}

/// A group without a registered simulation fails instantiation.
#[test]
fn test_unregistered_group_type() {
    let source = r#"
groups:
  - id: m
    name: MOTOR
    connectors:
      - { id: in, role: input }
"#;
    let loaded = load(source);
    let context = logicnet_graph::GraphContext::create(&loaded.diagram).unwrap();
    let err = SimulationRegistry::with_builtins()
        .create(&loaded.diagram, &context)
        .unwrap_err();
    assert_eq!(err.to_string(), "no simulation registered for 'MOTOR' (group s0)");
}

/// A flip-flop with only its reset wired still reads that wire as reset.
#[test]
fn test_reset_only_latch() {
    let source = r#"
groups:
  - id: reset
    name: SWITCH
    connectors:
      - { id: q, role: output }
  - id: latch
    name: SR-SET
    connectors:
      - { id: s, role: input }
      - { id: r, role: input }
      - { id: q, role: output }
wires:
  - { from: reset.q, to: latch.r }
"#;
    let mut harness = TestHarness::from_yaml(source);

    let reset = harness.loaded().group("reset").unwrap();
    let latch = harness.loaded().group("latch").unwrap();
    let driver = harness.simulations().id(reset).unwrap();
    assert_eq!(
        harness.simulations().inputs(latch).unwrap(),
        &[BoolInput::new(driver, false).with_slot(1)]
    );

    harness.set_state("latch", Some(true));
    harness.tick();
    assert_eq!(harness.state("latch"), Some(true));

    harness.set_state("reset", Some(true));
    harness.tick();
    assert_eq!(harness.state("latch"), Some(false));
}

/// An AND gate with one input left open does not pass the other through.
#[test]
fn test_and_with_open_input() {
    let source = r#"
groups:
  - id: a
    name: SWITCH
    connectors:
      - { id: q, role: output }
  - id: gate
    name: AND
    connectors:
      - { id: x, role: input }
      - { id: y, role: input }
      - { id: out, role: output }
wires:
  - { from: a.q, to: gate.x }
"#;
    let mut harness = TestHarness::from_yaml(source);

    harness.set_state("a", Some(true));
    harness.tick();
    assert_eq!(harness.state("gate"), Some(false));
}
