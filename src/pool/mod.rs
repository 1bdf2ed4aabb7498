//! Fixed-capacity arena of machines addressed by generational handles.
//!
//! Useful when machines are created and released at runtime but must not
//! outgrow a memory budget, or when the host refers to them by plain ids.
//! Every machine of a pool shares the pool's tick source and hooks.
//!
//! # Example
//!
//! ```rust
//! use cycle_fsm::core::{MachineConfig, ManualClock, StateDescriptor};
//! use cycle_fsm::engine::FsmError;
//! use cycle_fsm::pool::MachinePool;
//!
//! let config = MachineConfig::new(vec![StateDescriptor::named("Idle"), StateDescriptor::named("Run")]);
//! let mut pool = MachinePool::new(1).clock(ManualClock::new(0));
//!
//! let id = pool.create(&config).unwrap();
//! assert!(matches!(pool.create(&config), Err(FsmError::Allocation { capacity: 1 })));
//!
//! pool.handle(id).unwrap();
//! pool.request_transition(id, 1).unwrap();
//! pool.handle(id).unwrap();
//! assert_eq!(pool.get(id).unwrap().current_state(), 1);
//!
//! pool.release(id).unwrap();
//! assert_eq!(pool.get(id).unwrap_err(), FsmError::NullInstance);
//! ```

use crate::core::{MachineConfig, SharedData, SystemClock, TickSource};
use crate::engine::{FsmError, Machine};
use crate::hooks::{DefaultFatal, FatalHandler, TracingLogger, TransitionLogger};
use std::sync::Arc;

/// Handle to a machine slot.
///
/// A handle stays valid until the machine is released; afterwards the slot's
/// generation moves on and the old handle is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MachineId {
    index: usize,
    generation: u32,
}

impl MachineId {
    #[cfg(test)]
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            generation: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

enum Slot<'cfg> {
    Vacant {
        generation: u32,
    },
    Occupied {
        generation: u32,
        machine: Machine<'cfg>,
    },
}

/// Arena of at most `capacity` machines.
pub struct MachinePool<'cfg> {
    slots: Vec<Slot<'cfg>>,
    clock: Arc<dyn TickSource>,
    logger: Arc<dyn TransitionLogger>,
    fatal: Arc<dyn FatalHandler>,
}

impl<'cfg> MachinePool<'cfg> {
    /// Empty pool with the default tick source and hooks.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity)
                .map(|_| Slot::Vacant { generation: 0 })
                .collect(),
            clock: Arc::new(SystemClock::new()),
            logger: Arc::new(TracingLogger),
            fatal: Arc::new(DefaultFatal),
        }
    }

    /// Set the tick source for machines created from now on.
    pub fn clock<T: TickSource + 'static>(mut self, clock: T) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set the transition logger for machines created from now on.
    pub fn logger<L: TransitionLogger + 'static>(mut self, logger: L) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Set the assertion hook for machines created from now on.
    pub fn fatal_handler<F: FatalHandler + 'static>(mut self, fatal: F) -> Self {
        self.fatal = Arc::new(fatal);
        self
    }

    /// Construct a machine in the first free slot.
    pub fn create(&mut self, config: &'cfg MachineConfig) -> Result<MachineId, FsmError> {
        let capacity = self.capacity();
        let Some((index, generation)) =
            self.slots
                .iter()
                .enumerate()
                .find_map(|(index, slot)| match slot {
                    Slot::Vacant { generation } => Some((index, *generation)),
                    Slot::Occupied { .. } => None,
                })
        else {
            tracing::warn!(capacity, "machine pool exhausted");
            return Err(FsmError::Allocation { capacity });
        };

        let machine = Machine::construct(
            config,
            Arc::clone(&self.clock),
            Arc::clone(&self.logger),
            Arc::clone(&self.fatal),
            SharedData::Empty,
        )?;
        self.slots[index] = Slot::Occupied {
            generation,
            machine,
        };

        Ok(MachineId { index, generation })
    }

    pub fn get(&self, id: MachineId) -> Result<&Machine<'cfg>, FsmError> {
        match self.slots.get(id.index) {
            Some(Slot::Occupied {
                generation,
                machine,
            }) if *generation == id.generation => Ok(machine),
            Some(Slot::Vacant { generation }) if *generation == id.generation => {
                Err(FsmError::NotInitialized { index: id.index })
            }
            _ => Err(FsmError::NullInstance),
        }
    }

    pub fn get_mut(&mut self, id: MachineId) -> Result<&mut Machine<'cfg>, FsmError> {
        match self.slots.get_mut(id.index) {
            Some(Slot::Occupied {
                generation,
                machine,
            }) if *generation == id.generation => Ok(machine),
            Some(Slot::Vacant { generation }) if *generation == id.generation => {
                Err(FsmError::NotInitialized { index: id.index })
            }
            _ => Err(FsmError::NullInstance),
        }
    }

    /// Run one cycle of a machine.
    pub fn handle(&mut self, id: MachineId) -> Result<(), FsmError> {
        self.get_mut(id)?.handle()
    }

    pub fn request_transition(&mut self, id: MachineId, target: usize) -> Result<(), FsmError> {
        self.get_mut(id)?.request_transition(target)
    }

    pub fn reset(&mut self, id: MachineId) -> Result<(), FsmError> {
        self.get_mut(id)?.reset()
    }

    /// Run one cycle of every live machine, in slot order.
    ///
    /// Stops at the first machine that fails.
    pub fn handle_all(&mut self) -> Result<(), FsmError> {
        for slot in &mut self.slots {
            if let Slot::Occupied { machine, .. } = slot {
                machine.handle()?;
            }
        }
        Ok(())
    }

    /// Drop a machine and free its slot.
    pub fn release(&mut self, id: MachineId) -> Result<(), FsmError> {
        self.get(id)?;
        self.slots[id.index] = Slot::Vacant {
            generation: id.generation.wrapping_add(1),
        };
        Ok(())
    }

    /// Whether the handle refers to a constructed machine.
    pub fn is_constructed(&self, id: MachineId) -> bool {
        self.get(id).is_ok()
    }

    /// Handles of every live machine.
    pub fn ids(&self) -> Vec<MachineId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied { generation, .. } => Some(MachineId {
                    index,
                    generation: *generation,
                }),
                Slot::Vacant { .. } => None,
            })
            .collect()
    }

    /// Number of live machines.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
