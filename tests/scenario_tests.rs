//! End-to-end scenarios driving machines the way a control loop would.

use cycle_fsm::builder::MachineBuilder;
use cycle_fsm::core::{MachineConfig, ManualClock, SharedData, StateDescriptor, StateId};
use cycle_fsm::engine::FsmError;
use cycle_fsm::hooks::{FatalHandler, RecordingLogger, Violation};
use cycle_fsm::pool::MachinePool;
use cycle_fsm::state_ids;
use parking_lot::Mutex;
use std::sync::Arc;

type Trace = Arc<Mutex<Vec<String>>>;

fn traced(name: &'static str, trace: &Trace) -> StateDescriptor {
    let entry = Arc::clone(trace);
    let activity = Arc::clone(trace);
    let exit = Arc::clone(trace);
    StateDescriptor::named(name)
        .on_entry(move |_| entry.lock().push(format!("entry:{name}")))
        .on_activity(move |m| {
            activity
                .lock()
                .push(format!("activity:{name}@{}", m.duration()))
        })
        .on_exit(move |_| exit.lock().push(format!("exit:{name}")))
}

fn take(trace: &Trace) -> Vec<String> {
    std::mem::take(&mut *trace.lock())
}

#[test]
fn three_state_timeline() {
    let trace = Trace::default();
    let config = MachineConfig::builder()
        .name("abc")
        .state(traced("A", &trace))
        .state(traced("B", &trace))
        .state(traced("C", &trace))
        .build()
        .unwrap();
    let clock = ManualClock::new(0);
    let logger = RecordingLogger::new();
    let mut machine = MachineBuilder::new(&config)
        .clock(clock.clone())
        .logger(logger.clone())
        .build()
        .unwrap();

    // t=0: initial entry of A
    machine.handle().unwrap();
    assert_eq!(take(&trace), vec!["entry:A", "activity:A@0"]);
    assert_eq!(machine.current_state(), 0);
    assert_eq!(machine.duration(), 0);

    machine.request_transition(1).unwrap();

    // t=10: A -> B
    clock.set(10);
    machine.handle().unwrap();
    assert_eq!(take(&trace), vec!["exit:A", "entry:B", "activity:B@0"]);
    assert_eq!(machine.current_state(), 1);
    assert_eq!(machine.duration(), 0);
    assert!(machine.first_entry());

    // t=25: still B
    clock.set(25);
    machine.handle().unwrap();
    assert_eq!(take(&trace), vec!["activity:B@15"]);
    assert_eq!(machine.duration(), 15);
    assert!(!machine.first_entry());

    assert_eq!(logger.path(), vec![0, 1]);
    assert_eq!(logger.records()[1].tick, 10);
    assert_eq!(logger.records()[1].machine.as_deref(), Some("abc"));
}

state_ids! {
    enum Pump {
        Idle,
        Priming,
        Running,
        Fault,
    }
}

const PRIME_TIME: u32 = 300;
const MAX_PRESSURE: u32 = 80;

#[test]
fn pump_controller_uses_shared_data_and_dwell() {
    let config = MachineConfig::builder()
        .name("pump")
        .period(10)
        .state_for(Pump::Idle, |s| s)
        .state_for(Pump::Priming, |s| {
            s.on_entry(|m| m.set_data(SharedData::Word(0)))
                .on_activity(|m| {
                    let strokes = m.data().as_word().unwrap_or(0) + 1;
                    m.set_data(SharedData::Word(strokes));
                    if m.duration() >= PRIME_TIME {
                        m.request(Pump::Running).unwrap();
                    }
                })
        })
        .state_for(Pump::Running, |s| {
            s.on_activity(|m| {
                if let Some([pressure, ..]) = m.data().as_bytes() {
                    if u32::from(pressure) > MAX_PRESSURE {
                        m.request(Pump::Fault).unwrap();
                    }
                }
            })
        })
        .state_for(Pump::Fault, |s| {
            s.on_entry(|m| m.set_data(SharedData::Handle(m.current_state())))
        })
        .build()
        .unwrap();
    let clock = ManualClock::new(0);
    let mut machine = MachineBuilder::new(&config)
        .clock(clock.clone())
        .build()
        .unwrap();

    machine.handle().unwrap();
    machine.request(Pump::Priming).unwrap();

    for _ in 0..31 {
        clock.advance(10);
        machine.handle().unwrap();
    }
    assert_eq!(machine.state::<Pump>(), Some(Pump::Priming));
    assert_eq!(machine.data(), SharedData::Word(31));

    clock.advance(10);
    machine.handle().unwrap();
    assert_eq!(machine.state::<Pump>(), Some(Pump::Running));
    assert!(machine.first_entry());

    machine.set_data(SharedData::Bytes([95, 0, 0, 0]));
    clock.advance(10);
    machine.handle().unwrap();
    clock.advance(10);
    machine.handle().unwrap();

    assert_eq!(machine.state::<Pump>(), Some(Pump::Fault));
    // entry of Fault ran while Running was still current
    assert_eq!(machine.data(), SharedData::Handle(Pump::Running.index()));
}

#[derive(Default)]
struct CountingFatal {
    violations: Mutex<Vec<Violation>>,
}

impl FatalHandler for CountingFatal {
    fn fatal(&self, violation: &Violation) {
        self.violations.lock().push(violation.clone());
    }
}

#[test]
fn reentrant_handle_reaches_fatal_hook() {
    let fatal = Arc::new(CountingFatal::default());
    let config = MachineConfig::new(vec![StateDescriptor::named("Loop").on_activity(|m| {
        assert_eq!(m.handle(), Err(FsmError::Reentrant));
    })]);
    let mut machine = MachineBuilder::new(&config)
        .clock(|| 0u32)
        .shared_fatal_handler(fatal.clone())
        .build()
        .unwrap();

    machine.handle().unwrap();
    machine.handle().unwrap();

    assert_eq!(
        *fatal.violations.lock(),
        vec![Violation::ReentrantHandle, Violation::ReentrantHandle]
    );
}

#[test]
fn pool_runs_independent_machines() {
    let trace = Trace::default();
    let config = MachineConfig::new(vec![traced("A", &trace), traced("B", &trace)]);
    let clock = ManualClock::new(0);
    let mut pool = MachinePool::new(4).clock(clock.clone());

    let left = pool.create(&config).unwrap();
    let right = pool.create(&config).unwrap();
    pool.handle_all().unwrap();
    take(&trace);

    pool.request_transition(right, 1).unwrap();
    clock.advance(5);
    pool.handle_all().unwrap();

    assert_eq!(
        take(&trace),
        vec!["activity:A@5", "exit:A", "entry:B", "activity:B@0"]
    );
    assert_eq!(pool.get(left).unwrap().duration(), 5);
    assert_eq!(pool.get(right).unwrap().duration(), 0);

    pool.release(left).unwrap();
    assert_eq!(pool.handle(left), Err(FsmError::NullInstance));
    assert_eq!(pool.len(), 1);
}

#[test]
fn status_serializes_for_telemetry() {
    let config = MachineConfig::builder()
        .name("telemetry")
        .state(StateDescriptor::named("Only"))
        .build()
        .unwrap();
    let mut machine = MachineBuilder::new(&config)
        .clock(|| 0u32)
        .data(SharedData::Word(5))
        .build()
        .unwrap();
    machine.handle().unwrap();

    let json = serde_json::to_value(machine.status()).unwrap();

    assert_eq!(json["machine"], "telemetry");
    assert_eq!(json["current_name"], "Only");
    assert_eq!(json["first_entry"], true);
    assert_eq!(json["data"]["Word"], 5);
}

#[test]
fn version_is_exposed() {
    assert!(!cycle_fsm::VERSION.is_empty());
}
