//! Builder for machine configurations.

use crate::core::{MachineConfig, StateDescriptor, StateId};
use crate::engine::ConfigError;

struct TypedSlot {
    position: usize,
    index: usize,
    name: &'static str,
}

/// Builder for a [`MachineConfig`] with a fluent API.
///
/// States are appended in order; the first one added is the initial state.
pub struct MachineConfigBuilder {
    name: Option<String>,
    period: Option<u32>,
    states: Vec<StateDescriptor>,
    typed: Vec<TypedSlot>,
}

impl MachineConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            period: None,
            states: Vec::new(),
            typed: Vec::new(),
        }
    }

    /// Set the machine name shown in diagnostics.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare the nominal handler period, in ticks.
    ///
    /// Cycles that take more than twice this long are reported as overruns.
    pub fn period(mut self, ticks: u32) -> Self {
        self.period = Some(ticks);
        self
    }

    /// Append a state.
    pub fn state(mut self, state: StateDescriptor) -> Self {
        self.states.push(state);
        self
    }

    /// Append several states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = StateDescriptor>) -> Self {
        self.states.extend(states);
        self
    }

    /// Append the state named by a typed identifier.
    ///
    /// `configure` receives a descriptor already labelled with the id's name.
    /// `build` checks that the id's index matches the position it was added at.
    pub fn state_for<S, F>(mut self, id: S, configure: F) -> Self
    where
        S: StateId,
        F: FnOnce(StateDescriptor) -> StateDescriptor,
    {
        self.typed.push(TypedSlot {
            position: self.states.len(),
            index: id.index(),
            name: id.name(),
        });
        self.states.push(configure(StateDescriptor::of(id)));
        self
    }

    /// Build the configuration.
    /// Returns an error if no state was added or a typed state is misplaced.
    pub fn build(self) -> Result<MachineConfig, ConfigError> {
        if self.states.is_empty() {
            return Err(ConfigError::EmptyStateTable);
        }

        if let Some(slot) = self.typed.iter().find(|slot| slot.position != slot.index) {
            return Err(ConfigError::MisplacedState {
                name: slot.name,
                expected: slot.index,
                found: slot.position,
            });
        }

        Ok(MachineConfig {
            name: self.name,
            states: self.states,
            period: self.period,
        })
    }
}

impl Default for MachineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
