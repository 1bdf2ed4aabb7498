//! Transition logging sinks.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A state as shown in diagnostics: its name when it has one, else its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateRef<'a> {
    pub index: usize,
    pub name: Option<&'a str>,
}

impl fmt::Display for StateRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "#{}", self.index),
        }
    }
}

/// A transition about to be applied by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent<'a> {
    /// Name of the machine, if configured
    pub machine: Option<&'a str>,
    /// State being left, `None` on the initial entry
    pub from: Option<StateRef<'a>>,
    /// State being entered
    pub to: StateRef<'a>,
    /// Host tick sampled for the entry
    pub tick: u32,
}

/// Debug sink notified of every transition.
///
/// Logging is best effort: a sink cannot fail the transition.
pub trait TransitionLogger: Send + Sync {
    fn transition(&self, event: &TransitionEvent<'_>);
}

/// Emits each transition as a `tracing` debug event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl TransitionLogger for TracingLogger {
    fn transition(&self, event: &TransitionEvent<'_>) {
        let machine = event.machine.unwrap_or("fsm");
        match event.from {
            Some(from) => tracing::debug!(
                machine,
                from = %from,
                to = %event.to,
                tick = event.tick,
                "state transition"
            ),
            None => tracing::debug!(
                machine,
                to = %event.to,
                tick = event.tick,
                "initial state entry"
            ),
        }
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl TransitionLogger for NoopLogger {
    fn transition(&self, _event: &TransitionEvent<'_>) {}
}

/// Owned copy of a [`TransitionEvent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRecord {
    pub machine: Option<String>,
    pub from: Option<usize>,
    pub to: usize,
    pub tick: u32,
}

impl From<&TransitionEvent<'_>> for TransitionRecord {
    fn from(event: &TransitionEvent<'_>) -> Self {
        Self {
            machine: event.machine.map(str::to_owned),
            from: event.from.map(|state| state.index),
            to: event.to.index,
            tick: event.tick,
        }
    }
}

/// Keeps every transition in memory, in order.
///
/// Clones share the same record list, so a test can keep one handle and
/// give the other to a machine.
///
/// # Example
///
/// ```rust
/// use cycle_fsm::core::{MachineConfig, StateDescriptor};
/// use cycle_fsm::builder::MachineBuilder;
/// use cycle_fsm::hooks::RecordingLogger;
///
/// let config = MachineConfig::new(vec![StateDescriptor::named("A"), StateDescriptor::named("B")]);
/// let logger = RecordingLogger::new();
/// let mut machine = MachineBuilder::new(&config)
///     .clock(|| 0u32)
///     .logger(logger.clone())
///     .build()
///     .unwrap();
///
/// machine.handle().unwrap();
/// machine.request_transition(1).unwrap();
/// machine.handle().unwrap();
///
/// let path: Vec<_> = logger.records().iter().map(|r| (r.from, r.to)).collect();
/// assert_eq!(path, vec![(None, 0), (Some(0), 1)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<TransitionRecord>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the transitions recorded so far.
    pub fn records(&self) -> Vec<TransitionRecord> {
        self.records.lock().clone()
    }

    /// Indices visited: the first entry's target, then each transition target.
    pub fn path(&self) -> Vec<usize> {
        self.records.lock().iter().map(|record| record.to).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl TransitionLogger for RecordingLogger {
    fn transition(&self, event: &TransitionEvent<'_>) {
        self.records.lock().push(TransitionRecord::from(event));
    }
}
