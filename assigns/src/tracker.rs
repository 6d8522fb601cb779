//! Per-key change marks.
use crate::{Atom, Value};
use imbl::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How a [`ChangeTracker`] records changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Tracking is off: every key reports as changed.
    Disabled,
    /// Records which keys changed.
    Marks,
    /// Records which keys changed and the value each held at the start of the epoch.
    Values,
}

/// Value held by a key at the start of the current change epoch.
#[derive(Clone, Debug, PartialEq)]
pub enum Baseline {
    /// The key was not assigned when the epoch started.
    Absent,
    Value(Value),
}

impl Baseline {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Baseline::Absent => None,
            Baseline::Value(v) => Some(v),
        }
    }
}

impl From<Option<Value>> for Baseline {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Baseline::Absent, Baseline::Value)
    }
}

/// Records which keys changed since the last checkpoint.
///
/// Once a key has a baseline in `Values` mode, later changes in the same epoch leave it alone:
/// the baseline is always the value from *before* the first change, so that a differ can compare
/// it against the current value.
#[derive(Clone, Debug)]
pub enum ChangeTracker {
    Disabled,
    Marks(HashSet<Atom>),
    Values(HashMap<Atom, Baseline>),
}

impl ChangeTracker {
    /// Creates an empty tracker.
    pub fn new(mode: TrackingMode) -> ChangeTracker {
        match mode {
            TrackingMode::Disabled => ChangeTracker::Disabled,
            TrackingMode::Marks => ChangeTracker::Marks(HashSet::new()),
            TrackingMode::Values => ChangeTracker::Values(HashMap::new()),
        }
    }

    pub fn mode(&self) -> TrackingMode {
        match self {
            ChangeTracker::Disabled => TrackingMode::Disabled,
            ChangeTracker::Marks(_) => TrackingMode::Marks,
            ChangeTracker::Values(_) => TrackingMode::Values,
        }
    }

    /// Marks `key` as changed. `old` is the value the key held just before the change.
    pub fn record_change(&mut self, key: &Atom, old: Option<Value>) {
        match self {
            ChangeTracker::Disabled => {}
            ChangeTracker::Marks(keys) => {
                if keys.insert(key.clone()).is_none() {
                    trace!(%key, "marked changed");
                }
            }
            ChangeTracker::Values(baselines) => {
                if !baselines.contains_key(key) {
                    trace!(%key, "marked changed, baseline recorded");
                    baselines.insert(key.clone(), Baseline::from(old));
                }
            }
        }
    }

    /// Returns whether `key` changed in the current epoch.
    ///
    /// Always true when tracking is disabled.
    pub fn is_changed(&self, key: &Atom) -> bool {
        match self {
            ChangeTracker::Disabled => true,
            ChangeTracker::Marks(keys) => keys.contains(key),
            ChangeTracker::Values(baselines) => baselines.contains_key(key),
        }
    }

    /// Returns whether anything changed in the current epoch.
    ///
    /// Always true when tracking is disabled.
    pub fn has_changes(&self) -> bool {
        match self {
            ChangeTracker::Disabled => true,
            _ => !self.is_empty(),
        }
    }

    /// Number of keys marked in the current epoch (zero when disabled).
    pub fn len(&self) -> usize {
        match self {
            ChangeTracker::Disabled => 0,
            ChangeTracker::Marks(keys) => keys.len(),
            ChangeTracker::Values(baselines) => baselines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the keys marked in the current epoch, in no particular order.
    ///
    /// Yields nothing when tracking is disabled; check [`mode`](Self::mode) before treating an
    /// empty result as "nothing changed".
    pub fn changed_keys(&self) -> impl Iterator<Item = &Atom> + '_ {
        let marks = match self {
            ChangeTracker::Marks(keys) => Some(keys.iter()),
            _ => None,
        };
        let values = match self {
            ChangeTracker::Values(baselines) => Some(baselines.keys()),
            _ => None,
        };
        marks.into_iter().flatten().chain(values.into_iter().flatten())
    }

    /// Returns the baseline of `key`, if it changed and this tracker records values.
    pub fn baseline(&self, key: &Atom) -> Option<&Baseline> {
        match self {
            ChangeTracker::Values(baselines) => baselines.get(key),
            _ => None,
        }
    }

    /// Clears all marks, keeping the mode. Does nothing when tracking is disabled.
    pub fn checkpoint(&mut self) {
        let cleared = self.len();
        match self {
            ChangeTracker::Disabled => return,
            ChangeTracker::Marks(keys) => keys.clear(),
            ChangeTracker::Values(baselines) => baselines.clear(),
        }
        if cleared > 0 {
            debug!(cleared, mode = ?self.mode(), "checkpoint");
        }
    }
}
