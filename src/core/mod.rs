//! Core building blocks of a state table.
//!
//! This module contains everything an application hands to the engine:
//! - State descriptors with optional entry/activity/exit callbacks
//! - Typed state identifiers via the `StateId` trait
//! - The machine configuration that owns the table
//! - The shared data slot and host tick sources
//!
//! Nothing here drives a machine; see [`crate::engine`] for that.

mod callback;
mod clock;
mod config;
mod data;
mod state;

pub use callback::Callback;
pub use clock::{ManualClock, SystemClock, TickSource};
pub use config::MachineConfig;
pub use data::SharedData;
pub use state::{StateDescriptor, StateId};
