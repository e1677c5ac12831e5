//! Simulation clock.
//!
//! The clock is owned and advanced by whoever drives the simulation loop;
//! simulations only read it.

/// Default cycle length in milliseconds.
pub const DEFAULT_RESOLUTION_MS: u32 = 100;

/// Read-only view of simulation time.
pub trait Clock {
    /// Monotonic cycle counter.
    fn cycle(&self) -> u64;

    /// Milliseconds per cycle.
    fn resolution(&self) -> u32;

    /// Number of whole cycles covering `seconds`, rounded up.
    fn cycles_for(&self, seconds: f64) -> u64 {
        let resolution = self.resolution();
        if resolution == 0 || seconds <= 0.0 {
            return 0;
        }
        (seconds * 1000.0 / f64::from(resolution)).ceil() as u64
    }
}

/// Caller-owned cycle counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    cycle: u64,
    resolution: u32,
}

impl SimulationClock {
    pub fn new(resolution: u32) -> Self {
        Self { cycle: 0, resolution }
    }

    /// Advance by one cycle and return the new cycle number.
    pub fn tick(&mut self) -> u64 {
        self.cycle += 1;
        self.cycle
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION_MS)
    }
}

impl Clock for SimulationClock {
    fn cycle(&self) -> u64 {
        self.cycle
    }

    fn resolution(&self) -> u32 {
        self.resolution
    }
}
