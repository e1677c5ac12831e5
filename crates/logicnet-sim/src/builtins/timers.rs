//! Delay timers.
//!
//! The delay is read once from the group's `delay` property (seconds) and
//! converted to cycles with the clock resolution on every step, so a clock
//! with a different resolution keeps wall-clock semantics.

use logicnet_shapes::GroupRef;
use tracing::warn;

use crate::clock::Clock;
use crate::simulation::{BoolSimulation, SimulationType};

/// Group property holding the delay in seconds.
pub const DELAY_PROPERTY: &str = "delay";

fn delay_seconds(group: &GroupRef<'_>) -> f64 {
    let Some(raw) = group.property(DELAY_PROPERTY) else {
        return 0.0;
    };
    match raw.trim().parse::<f64>() {
        Ok(seconds) if seconds >= 0.0 => seconds,
        _ => {
            warn!(group = %group.id, value = raw, "invalid timer delay, using 0");
            0.0
        }
    }
}

/// Output goes high once the input has been high for the whole delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnDelay {
    delay: f64,
    since: Option<u64>,
    state: Option<bool>,
}

impl BoolSimulation for OnDelay {
    fn state(&self) -> Option<bool> {
        self.state
    }

    fn set_state(&mut self, state: Option<bool>) {
        self.state = state;
    }

    fn run(&mut self, inputs: &[Option<bool>], clock: &dyn Clock) {
        match inputs.first().copied().flatten() {
            Some(true) => {
                let since = *self.since.get_or_insert(clock.cycle());
                self.state = Some(clock.cycle().saturating_sub(since) >= clock.cycles_for(self.delay));
            }
            Some(false) => {
                self.since = None;
                self.state = Some(false);
            }
            None => {
                self.since = None;
                self.state = None;
            }
        }
    }
}

impl SimulationType for OnDelay {
    const KEY: &'static str = "TIMER-ON";

    fn create(group: &GroupRef<'_>) -> Self {
        Self {
            delay: delay_seconds(group),
            since: None,
            state: Some(false),
        }
    }
}

/// Output follows a rising input at once and falls only after the input has
/// been low for the whole delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffDelay {
    delay: f64,
    fell: Option<u64>,
    state: Option<bool>,
}

impl BoolSimulation for OffDelay {
    fn state(&self) -> Option<bool> {
        self.state
    }

    fn set_state(&mut self, state: Option<bool>) {
        self.state = state;
    }

    fn run(&mut self, inputs: &[Option<bool>], clock: &dyn Clock) {
        match inputs.first().copied().flatten() {
            Some(true) => {
                self.fell = None;
                self.state = Some(true);
            }
            Some(false) if self.state == Some(true) => {
                let fell = *self.fell.get_or_insert(clock.cycle());
                self.state = Some(clock.cycle().saturating_sub(fell) < clock.cycles_for(self.delay));
            }
            Some(false) => {
                self.fell = None;
                self.state = Some(false);
            }
            None => {
                self.fell = None;
                self.state = None;
            }
        }
    }
}

impl SimulationType for OffDelay {
    const KEY: &'static str = "TIMER-OFF";

    fn create(group: &GroupRef<'_>) -> Self {
        Self {
            delay: delay_seconds(group),
            fell: None,
            state: Some(false),
        }
    }
}

/// A rising input starts a pulse lasting the delay, at least one cycle.
/// Edges during a running pulse are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    delay: f64,
    started: Option<u64>,
    last_input: Option<bool>,
    state: Option<bool>,
}

impl BoolSimulation for Pulse {
    fn state(&self) -> Option<bool> {
        self.state
    }

    fn set_state(&mut self, state: Option<bool>) {
        self.state = state;
    }

    fn run(&mut self, inputs: &[Option<bool>], clock: &dyn Clock) {
        let input = inputs.first().copied().flatten();
        let cycle = clock.cycle();
        let length = clock.cycles_for(self.delay).max(1);

        if let Some(started) = self.started
            && cycle.saturating_sub(started) >= length
        {
            self.started = None;
        }
        if input == Some(true) && self.last_input != Some(true) && self.started.is_none() {
            self.started = Some(cycle);
        }
        self.last_input = input;

        self.state = match (input, self.started) {
            (_, Some(_)) => Some(true),
            (None, None) => None,
            (Some(_), None) => Some(false),
        };
    }
}

impl SimulationType for Pulse {
    const KEY: &'static str = "TIMER-PULSE";

    fn create(group: &GroupRef<'_>) -> Self {
        Self {
            delay: delay_seconds(group),
            started: None,
            last_input: None,
            state: Some(false),
        }
    }
}
