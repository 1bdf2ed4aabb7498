//! Machine configuration: the application-owned state table.

use super::state::StateDescriptor;
use crate::builder::MachineConfigBuilder;

/// Immutable description of a machine.
///
/// The configuration is owned by the application and borrowed by every
/// [`Machine`](crate::engine::Machine) built from it, so it must outlive
/// them. Its contents cannot change once a machine holds it.
///
/// An empty table is representable here and rejected when a machine is
/// constructed.
#[derive(Debug, Default)]
pub struct MachineConfig {
    pub(crate) name: Option<String>,
    pub(crate) states: Vec<StateDescriptor>,
    pub(crate) period: Option<u32>,
}

impl MachineConfig {
    /// Anonymous configuration over an ordered state table.
    pub fn new(states: Vec<StateDescriptor>) -> Self {
        Self {
            name: None,
            states,
            period: None,
        }
    }

    /// Start a fluent builder.
    pub fn builder() -> MachineConfigBuilder {
        MachineConfigBuilder::new()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Nominal handler period in ticks, if declared.
    pub fn period(&self) -> Option<u32> {
        self.period
    }

    pub fn states(&self) -> &[StateDescriptor] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&StateDescriptor> {
        self.states.get(index)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Display label of a state, if it has one.
    pub fn state_name(&self, index: usize) -> Option<&str> {
        self.state(index).and_then(StateDescriptor::name)
    }
}
