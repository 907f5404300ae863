//! Benchmark for the per-step simulation and the draw list.
//!
//! Run with: cargo bench --package tessera --bench simulation_benchmark

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tessera::economy::ItemKind;
use tessera::physics::{resolve_axis_move, Axis};
use tessera::procedural::{BlockType, WorldConfig, WorldManager};
use tessera::shared::{Collider, Vec2};
use tessera::{build_draw_list, GameConfig, Simulation};

fn settled_simulation() -> Simulation {
    let mut sim = Simulation::new(GameConfig::default()).expect("default config");
    for _ in 0..240 {
        sim.step(1.0 / 60.0);
    }
    sim
}

fn benchmark_axis_move(c: &mut Criterion) {
    let mut world = WorldManager::new(WorldConfig::default()).expect("valid config");
    world.materialize_all();

    c.bench_function("resolve_axis_move_landing", |b| {
        b.iter(|| {
            let mut collider = Collider::new(1000.0, 30.0, 16.0, 32.0);
            let mut force = 60.0;
            black_box(resolve_axis_move(
                &world,
                &mut collider,
                &mut force,
                Axis::Vertical,
                black_box(0.1),
            ))
        });
    });
}

fn benchmark_step(c: &mut Criterion) {
    let mut sim = settled_simulation();

    c.bench_function("simulation_step_idle", |b| {
        b.iter(|| black_box(sim.step(1.0 / 60.0)));
    });
}

fn benchmark_step_with_items(c: &mut Criterion) {
    c.bench_function("simulation_step_64_items", |b| {
        b.iter_batched(
            || {
                let mut sim = settled_simulation();
                let origin = sim.player().midpoint();
                for i in 0..64 {
                    let offset = (i as f32 - 32.0) * 6.0;
                    sim.spawn_item(
                        ItemKind::Block(BlockType::Dirt),
                        Vec2::new(origin.x + offset, origin.y - 40.0),
                    );
                }
                sim
            },
            |mut sim| black_box(sim.step(1.0 / 60.0)),
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_draw_list(c: &mut Criterion) {
    let sim = settled_simulation();

    c.bench_function("build_draw_list_default_view", |b| {
        b.iter(|| black_box(build_draw_list(&sim)));
    });
}

criterion_group!(
    benches,
    benchmark_axis_move,
    benchmark_step,
    benchmark_step_with_items,
    benchmark_draw_list
);
criterion_main!(benches);
