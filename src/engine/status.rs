//! Serializable snapshot of a machine for diagnostics and telemetry.

use crate::core::SharedData;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a machine's runtime state.
///
/// Snapshots are read-only: there is no way to load one back into a machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineStatus {
    /// Machine name, if configured
    pub machine: Option<String>,

    /// Index of the current state
    pub current: usize,

    /// Label of the current state, if it has one
    pub current_name: Option<String>,

    /// Requested state waiting for the next handler cycle
    pub pending: Option<usize>,

    /// Whether the first handler cycle has run since construction or reset
    pub entered: bool,

    /// Dwell time in the current state, in ticks
    pub duration: u32,

    /// Handler cycles in the current state since entry
    pub cycles: u32,

    /// Whether the current state was entered in the last handler cycle
    pub first_entry: bool,

    /// Shared data slot
    pub data: SharedData,
}
