//! Run configuration.
//!
//! Loaded from YAML; every field is optional.
//!
//! ```yaml
//! cycles: 20
//! resolution_ms: 100
//! ignore_cycles: false
//! initial:
//!   start: true
//! events:
//!   - { cycle: 5, group: start, state: false }
//! watch: [lamp]
//! ```
//!
//! Groups are referred to by their document id. A `null` state is an
//! undefined signal.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use logicnet_sim::DEFAULT_RESOLUTION_MS;

use crate::error::{Result, RunError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Cycles to run.
    pub cycles: u64,
    /// Milliseconds per cycle.
    pub resolution_ms: u32,
    /// Accept feedback loops between groups and run them in best-effort
    /// order.
    pub ignore_cycles: bool,
    /// States forced before the first cycle.
    pub initial: IndexMap<String, Option<bool>>,
    /// States forced at the start of a given cycle. Cycle 0 events apply
    /// right after `initial`.
    pub events: Vec<ScheduledEvent>,
    /// Groups whose states are logged every cycle. Empty means all.
    pub watch: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cycles: 10,
            resolution_ms: DEFAULT_RESOLUTION_MS,
            ignore_cycles: false,
            initial: IndexMap::new(),
            events: Vec::new(),
            watch: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub cycle: u64,
    pub group: String,
    pub state: Option<bool>,
}

impl RunConfig {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| RunError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    /// Every group id the config refers to.
    pub fn referenced_groups(&self) -> impl Iterator<Item = &str> {
        self.initial
            .keys()
            .map(String::as_str)
            .chain(self.events.iter().map(|event| event.group.as_str()))
            .chain(self.watch.iter().map(String::as_str))
    }
}
