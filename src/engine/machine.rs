//! The machine instance and its transition algorithm.

use crate::core::{MachineConfig, SharedData, StateDescriptor, StateId, TickSource};
use crate::engine::error::{ConfigError, FsmError};
use crate::engine::status::MachineStatus;
use crate::hooks::{FatalHandler, StateRef, TransitionEvent, TransitionLogger, Violation};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Upper bound of the dwell and cycle counters. Accumulation clamps here.
pub const DWELL_CEILING: u32 = 0x1FFF_FFFF;

/// Runtime instance of a state table.
///
/// A machine borrows its [`MachineConfig`] and is driven by calling
/// [`handle`](Machine::handle) once per control cycle. Between cycles the
/// host (or a callback) requests the next state with
/// [`request_transition`](Machine::request_transition).
///
/// # Example
///
/// ```rust
/// use cycle_fsm::core::{MachineConfig, ManualClock, StateDescriptor};
/// use cycle_fsm::builder::MachineBuilder;
///
/// let config = MachineConfig::builder()
///     .name("blinker")
///     .state(StateDescriptor::named("Off"))
///     .state(StateDescriptor::named("On"))
///     .build()
///     .unwrap();
///
/// let clock = ManualClock::new(0);
/// let mut machine = MachineBuilder::new(&config).clock(clock.clone()).build().unwrap();
///
/// machine.handle().unwrap();
/// assert_eq!(machine.current_state(), 0);
/// assert!(machine.first_entry());
///
/// machine.request_transition(1).unwrap();
/// clock.advance(10);
/// machine.handle().unwrap();
/// assert_eq!(machine.current_state(), 1);
/// assert_eq!(machine.duration(), 0);
///
/// clock.advance(15);
/// machine.handle().unwrap();
/// assert_eq!(machine.duration(), 15);
/// assert!(!machine.first_entry());
/// ```
pub struct Machine<'cfg> {
    config: &'cfg MachineConfig,
    clock: Arc<dyn TickSource>,
    logger: Arc<dyn TransitionLogger>,
    fatal: Arc<dyn FatalHandler>,
    current: usize,
    next: usize,
    pending_initial_entry: bool,
    entering: Option<usize>,
    dwell: u32,
    cycles: u32,
    last_tick: u32,
    first_entry: bool,
    in_handler: bool,
    data: SharedData,
    initial_data: SharedData,
}

impl<'cfg> Machine<'cfg> {
    /// Construct a machine with the default tick source and hooks.
    ///
    /// Use [`MachineBuilder`](crate::builder::MachineBuilder) to inject a
    /// host clock, a logger or a fatal handler.
    pub fn new(config: &'cfg MachineConfig) -> Result<Self, FsmError> {
        crate::builder::MachineBuilder::new(config).build()
    }

    pub(crate) fn construct(
        config: &'cfg MachineConfig,
        clock: Arc<dyn TickSource>,
        logger: Arc<dyn TransitionLogger>,
        fatal: Arc<dyn FatalHandler>,
        data: SharedData,
    ) -> Result<Self, FsmError> {
        if config.is_empty() {
            return Err(ConfigError::EmptyStateTable.into());
        }

        tracing::trace!(
            machine = config.name().unwrap_or("fsm"),
            states = config.len(),
            "machine constructed"
        );

        Ok(Self {
            config,
            clock,
            logger,
            fatal,
            current: 0,
            next: 0,
            pending_initial_entry: true,
            entering: None,
            dwell: 0,
            cycles: 0,
            last_tick: 0,
            first_entry: false,
            in_handler: false,
            data,
            initial_data: data,
        })
    }

    /// Run one control cycle.
    ///
    /// Applies the pending transition (exit of the old state, entry of the
    /// new one) or accumulates dwell time, then runs the activity of the
    /// resulting current state.
    ///
    /// The transition target is fixed when the cycle starts: a request made
    /// by the exit callback of the state being left does not redirect it, and
    /// stays pending for the next cycle. If a callback panics and the host
    /// catches the unwind, the machine still accepts `handle` and `reset`.
    pub fn handle(&mut self) -> Result<(), FsmError> {
        if self.in_handler {
            self.fatal.fatal(&Violation::ReentrantHandle);
            return Err(FsmError::Reentrant);
        }

        let count = self.config.len();
        if self.next >= count {
            self.fatal.fatal(&Violation::StateOutOfRange {
                index: self.next,
                count,
            });
            return Err(FsmError::InvalidState {
                index: self.next,
                count,
            });
        }

        self.in_handler = true;
        let mut cycle = HandlerCycle { machine: self };
        cycle.manage();
        cycle.run_activity();

        Ok(())
    }

    fn manage(&mut self) {
        if self.pending_initial_entry {
            self.pending_initial_entry = false;
            self.enter(None, self.next);
            self.first_entry = true;
        } else if self.current != self.next {
            let from = self.current;
            let to = self.next;
            self.exit(from);
            self.enter(Some(from), to);
            self.first_entry = true;
        } else {
            self.first_entry = false;
            self.accumulate();
        }
    }

    fn enter(&mut self, from: Option<usize>, target: usize) {
        let config = self.config;
        let tick = self.clock.now();
        self.last_tick = tick;
        self.dwell = 0;
        self.cycles = 0;

        self.logger.transition(&TransitionEvent {
            machine: config.name(),
            from: from.map(|index| state_ref(config, index)),
            to: state_ref(config, target),
            tick,
        });

        // current_state() keeps reporting the old state until entry returns
        self.entering = Some(target);
        if let Some(entry) = config.state(target).and_then(StateDescriptor::entry) {
            entry.invoke(self);
        }
        self.entering = None;
        self.current = target;
    }

    fn exit(&mut self, state: usize) {
        let config = self.config;
        if let Some(exit) = config.state(state).and_then(StateDescriptor::exit) {
            exit.invoke(self);
        }
    }

    fn accumulate(&mut self) {
        let now = self.clock.now();
        let delta = now.wrapping_sub(self.last_tick);
        self.last_tick = now;

        if let Some(period) = self.config.period() {
            if delta > period.saturating_mul(2) {
                tracing::warn!(
                    machine = self.config.name().unwrap_or("fsm"),
                    state = %state_ref(self.config, self.current),
                    elapsed = delta,
                    period,
                    "handler cycle overran nominal period"
                );
            }
        }

        self.dwell = self.dwell.saturating_add(delta).min(DWELL_CEILING);
        self.cycles = self.cycles.saturating_add(1).min(DWELL_CEILING);
    }

    fn run_activity(&mut self) {
        let config = self.config;
        if let Some(activity) = config.state(self.current).and_then(StateDescriptor::activity) {
            activity.invoke(self);
        }
    }

    /// Return to the condition right after construction.
    ///
    /// No callback runs and the tick source is not read; the next
    /// [`handle`](Machine::handle) performs a fresh initial entry of state 0.
    /// Fails only when called from inside one of this machine's callbacks.
    pub fn reset(&mut self) -> Result<(), FsmError> {
        if self.in_handler {
            self.fatal.fatal(&Violation::ReentrantReset);
            return Err(FsmError::Reentrant);
        }

        self.current = 0;
        self.next = 0;
        self.pending_initial_entry = true;
        self.entering = None;
        self.dwell = 0;
        self.cycles = 0;
        self.last_tick = 0;
        self.first_entry = false;
        self.data = self.initial_data;
        Ok(())
    }

    /// Request the state to enter on the next handler cycle.
    ///
    /// Later requests overwrite earlier ones. Requesting the current state
    /// cancels a pending transition; it never re-enters the state.
    pub fn request_transition(&mut self, target: usize) -> Result<(), FsmError> {
        let count = self.config.len();
        if target >= count {
            tracing::warn!(
                machine = self.config.name().unwrap_or("fsm"),
                target,
                count,
                "rejected transition to unknown state"
            );
            return Err(FsmError::InvalidState {
                index: target,
                count,
            });
        }

        self.next = target;
        Ok(())
    }

    /// Typed form of [`request_transition`](Machine::request_transition).
    pub fn request<S: StateId>(&mut self, target: S) -> Result<(), FsmError> {
        self.request_transition(target.index())
    }

    pub fn current_state(&self) -> usize {
        self.current
    }

    /// Current state as a typed identifier.
    pub fn state<S: StateId>(&self) -> Option<S> {
        S::from_index(self.current)
    }

    /// State that the next handler cycle will be in.
    pub fn next_state(&self) -> usize {
        self.next
    }

    /// Transition that the next handler cycle will apply, if any.
    pub fn pending_transition(&self) -> Option<usize> {
        (self.pending_initial_entry || self.next != self.current).then_some(self.next)
    }

    /// Target state while its entry callback runs, `None` otherwise.
    pub fn entering_state(&self) -> Option<usize> {
        self.entering
    }

    /// Whether the initial entry has happened since construction or reset.
    pub fn is_entered(&self) -> bool {
        !self.pending_initial_entry
    }

    /// Ticks spent in the current state since it was entered.
    pub fn duration(&self) -> u32 {
        self.dwell
    }

    /// Handler cycles spent in the current state since it was entered.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Restart dwell time from now. Does not touch the cycle counter.
    pub fn reset_duration(&mut self) {
        self.dwell = 0;
        self.last_tick = self.clock.now();
    }

    /// True only in the handler cycle that entered the current state.
    pub fn first_entry(&self) -> bool {
        self.first_entry
    }

    pub fn data(&self) -> SharedData {
        self.data
    }

    pub fn set_data(&mut self, data: SharedData) {
        self.data = data;
    }

    pub fn state_count(&self) -> usize {
        self.config.len()
    }

    pub fn state_name(&self, index: usize) -> Option<&'cfg str> {
        self.config.state_name(index)
    }

    pub fn current_state_name(&self) -> Option<&'cfg str> {
        self.config.state_name(self.current)
    }

    pub fn name(&self) -> Option<&'cfg str> {
        self.config.name()
    }

    pub fn config(&self) -> &'cfg MachineConfig {
        self.config
    }

    /// Snapshot for diagnostics.
    pub fn status(&self) -> MachineStatus {
        MachineStatus {
            machine: self.name().map(str::to_owned),
            current: self.current,
            current_name: self.current_state_name().map(str::to_owned),
            pending: self.pending_transition(),
            entered: self.is_entered(),
            duration: self.dwell,
            cycles: self.cycles,
            first_entry: self.first_entry,
            data: self.data,
        }
    }
}

/// Marks a machine as inside `handle` until dropped, unwinding included.
struct HandlerCycle<'m, 'cfg> {
    machine: &'m mut Machine<'cfg>,
}

impl<'cfg> Deref for HandlerCycle<'_, 'cfg> {
    type Target = Machine<'cfg>;

    fn deref(&self) -> &Self::Target {
        self.machine
    }
}

impl DerefMut for HandlerCycle<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.machine
    }
}

impl Drop for HandlerCycle<'_, '_> {
    fn drop(&mut self) {
        self.machine.entering = None;
        self.machine.in_handler = false;
    }
}

fn state_ref(config: &MachineConfig, index: usize) -> StateRef<'_> {
    StateRef {
        index,
        name: config.state_name(index),
    }
}

impl fmt::Debug for Machine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.config.name())
            .field("current", &self.current)
            .field("next", &self.next)
            .field("pending_initial_entry", &self.pending_initial_entry)
            .field("dwell", &self.dwell)
            .field("cycles", &self.cycles)
            .field("last_tick", &self.last_tick)
            .field("first_entry", &self.first_entry)
            .field("data", &self.data)
            .finish()
    }
}
