//! Pump Controller with a Machine Pool
//!
//! This example demonstrates several machines driven from one control loop.
//!
//! Key concepts:
//! - Entry/activity/exit callbacks
//! - Shared data slot carrying context between states
//! - A fixed-capacity pool addressed by handles
//! - Wall-clock ticks from `SystemClock`
//!
//! Run with: cargo run --example pump_controller

use cycle_fsm::core::{MachineConfig, SharedData, StateDescriptor, SystemClock};
use cycle_fsm::pool::MachinePool;
use std::thread::sleep;
use std::time::Duration;

fn pump_config(name: &str, prime_ms: u32) -> MachineConfig {
    MachineConfig::builder()
        .name(name)
        .period(20)
        .state(StateDescriptor::named("Idle"))
        .state(
            StateDescriptor::named("Priming")
                .on_entry(|m| m.set_data(SharedData::Word(0)))
                .on_activity(move |m| {
                    let strokes = m.data().as_word().unwrap_or(0) + 1;
                    m.set_data(SharedData::Word(strokes));
                    if m.duration() >= prime_ms {
                        let _ = m.request_transition(2);
                    }
                })
                .on_exit(|m| {
                    println!(
                        "  {} primed after {} strokes",
                        m.name().unwrap_or("pump"),
                        m.data().as_word().unwrap_or(0)
                    )
                }),
        )
        .state(StateDescriptor::named("Running"))
        .build()
        .expect("pump table is valid")
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Pump Controller ===\n");

    let fast = pump_config("pump-fast", 100);
    let slow = pump_config("pump-slow", 250);

    let mut pool = MachinePool::new(2).clock(SystemClock::new());
    let pumps = [
        pool.create(&fast).expect("slot available"),
        pool.create(&slow).expect("slot available"),
    ];

    for id in pumps {
        pool.request_transition(id, 1).expect("valid state");
    }

    for _ in 0..20 {
        pool.handle_all().expect("handler cycle");
        sleep(Duration::from_millis(20));
    }

    for id in pumps {
        let status = pool.get(id).expect("live machine").status();
        println!(
            "  {:<10} state={:<8} dwell={}ms",
            status.machine.unwrap_or_default(),
            status.current_name.unwrap_or_default(),
            status.duration
        );
    }

    println!("\n=== Example Complete ===");
}
