//! Counter
//!
//! This example drives a counter through an immutable container with the
//! logging hooks installed.
//!
//! Key concepts:
//! - Every update produces a new value; the old one is never touched
//! - The subscriber stands in for a UI redraw
//! - Hooks observe initialization and each update
//!
//! Run with: cargo run --example counter

use immutable_context::{tools, ImmutableContainer, LifecycleHooks};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct Counter {
    count: i64,
}

fn increment(counter: &mut Counter) {
    counter.count += 1;
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Counter Example ===\n");

    let updates = Rc::new(Cell::new(0));
    let seen = Rc::clone(&updates);
    let hooks = tools::logger().chain(
        LifecycleHooks::new().on_update(move |_: &Counter| seen.set(seen.get() + 1)),
    );

    let container = ImmutableContainer::new(Counter { count: 0 }, hooks);
    container.bind(Counter { count: 0 }, |counter: &Counter| {
        println!("  render: count = {}", counter.count);
    });

    container.apply(increment);
    container.apply(increment);
    container.apply_named("reset", |counter| counter.count = 0);
    container.apply_named("add_ten", |counter| counter.count += 10);

    assert_eq!(container.state(), Some(Counter { count: 10 }));
    assert_eq!(updates.get(), 4);
    println!("\n  ✓ {} updates observed", updates.get());

    println!("\n=== Example Complete ===");
}
