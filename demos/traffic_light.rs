//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions driven by dwell time
//! - Typed state identifiers with `state_ids!`
//! - A host-driven clock advanced by the control loop
//! - Transition logging through `tracing`
//!
//! Run with: cargo run --example traffic_light

use cycle_fsm::builder::MachineBuilder;
use cycle_fsm::core::{MachineConfig, ManualClock, TickSource};
use cycle_fsm::state_ids;

state_ids! {
    enum TrafficLight {
        Red,
        Green,
        Yellow,
    }
}

const CYCLE_MS: u32 = 500;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let config = MachineConfig::builder()
        .name("traffic-light")
        .period(CYCLE_MS)
        .state_for(TrafficLight::Red, |s| {
            s.on_activity(|m| {
                if m.duration() >= 4_000 {
                    let _ = m.request(TrafficLight::Green);
                }
            })
        })
        .state_for(TrafficLight::Green, |s| {
            s.on_activity(|m| {
                if m.duration() >= 3_000 {
                    let _ = m.request(TrafficLight::Yellow);
                }
            })
        })
        .state_for(TrafficLight::Yellow, |s| {
            s.on_entry(|_| println!("  Caution!"))
                .on_activity(|m| {
                    if m.duration() >= 1_000 {
                        let _ = m.request(TrafficLight::Red);
                    }
                })
        })
        .build()
        .expect("traffic light table is valid");

    let clock = ManualClock::new(0);
    let mut machine = MachineBuilder::new(&config)
        .clock(clock.clone())
        .build()
        .expect("machine builds");

    for _ in 0..40 {
        machine.handle().expect("handler cycle");
        if machine.first_entry() {
            println!(
                "t={:>6}ms  {:?}",
                clock.now(),
                machine.state::<TrafficLight>()
            );
        }
        clock.advance(CYCLE_MS);
    }

    println!("\nThis is a cyclic state machine - the sequence repeats:");
    println!("  Red -> Green -> Yellow -> Red -> ...");
    println!("\n=== Example Complete ===");
}
