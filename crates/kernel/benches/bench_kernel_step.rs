use std::hint::black_box;
use std::time::Instant;

use lander_common::{ControlState, Rotation};
use lander_kernel::{Entity, LanderConfig, World};

fn make_world(rock_count: u32) -> World {
    let mut config = LanderConfig::default();
    config.level.rocks.count = rock_count;
    config.fuel.initial = u32::MAX;
    World::new(config)
}

fn bench_hover(rock_count: u32, iterations: usize) {
    let mut world = make_world(rock_count);
    let controls = ControlState {
        rotation: Rotation::None,
        thrust: true,
    };

    let start = Instant::now();
    for _ in 0..iterations {
        world.apply_controls(black_box(controls));
        world.step();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  hover step ({rock_count} rocks, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_resting(iterations: usize) {
    // Falls onto the start pad, then resolves a contact every step.
    let mut world = make_world(11);
    for _ in 0..300 {
        world.apply_controls(ControlState::IDLE);
        world.step();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        world.apply_controls(black_box(ControlState::IDLE));
        world.step();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  resting step ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_collision_check(iterations: usize) {
    let a = Entity::default();
    let b = Entity::default();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(black_box(&a).check_collision(black_box(&b)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  check_collision ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_state_hash(iterations: usize) {
    let world = make_world(1000);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(black_box(&world).state_hash());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  state_hash (1000 rocks, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Kernel Step Benchmarks ===\n");

    println!("Fixed step while hovering:");
    bench_hover(11, 100_000);
    bench_hover(100, 10_000);
    bench_hover(1000, 1_000);

    println!("\nFixed step with resting contact:");
    bench_resting(100_000);

    println!("\nCollision primitives:");
    bench_collision_check(1_000_000);

    println!("\nState hash:");
    bench_state_hash(1_000);

    println!("\n=== Done ===");
}
