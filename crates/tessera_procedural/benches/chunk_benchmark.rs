//! Benchmark for chunk generation and world materialization.
//!
//! Run with: cargo bench --package tessera_procedural --bench chunk_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tessera_procedural::{ChunkCoord, ChunkGenerator, HeightField, WorldConfig, WorldManager};
use tessera_shared::Collider;

fn benchmark_heightfield(c: &mut Criterion) {
    let field = HeightField::default();

    c.bench_function("heightfield_column", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(field.height(black_box(x)))
        });
    });
}

fn benchmark_single_chunk(c: &mut Criterion) {
    let gen = ChunkGenerator::new(&WorldConfig::default());

    c.bench_function("single_chunk_generation", |b| {
        let mut coord = 0i32;
        b.iter(|| {
            coord = coord.wrapping_add(1);
            black_box(gen.generate(ChunkCoord::new(coord, coord & 1)))
        });
    });
}

fn benchmark_materialize_world(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_generation");
    group.throughput(Throughput::Elements(20));

    group.bench_function("materialize_10x2_chunks", |b| {
        b.iter(|| {
            let mut world = WorldManager::new(WorldConfig::default()).expect("valid config");
            black_box(world.materialize_all())
        });
    });

    group.finish();
}

fn benchmark_streaming_walk(c: &mut Criterion) {
    c.bench_function("streaming_walk_across_world", |b| {
        b.iter(|| {
            let mut world = WorldManager::new(WorldConfig::default()).expect("valid config");
            let mut x = 0.0f32;
            while x < 2400.0 {
                black_box(world.update(&Collider::new(x, 0.0, 160.0, 90.0)));
                x += 16.0;
            }
        });
    });
}

fn benchmark_blocks_in_area(c: &mut Criterion) {
    let mut world = WorldManager::new(WorldConfig::default()).expect("valid config");
    world.materialize_all();

    c.bench_function("blocks_in_area_viewport", |b| {
        b.iter(|| {
            black_box(
                world
                    .blocks_in_area(black_box(100.0), 0.0, 320.0, 180.0)
                    .filter(|b| b.is_solid())
                    .count(),
            )
        });
    });
}

criterion_group!(
    benches,
    benchmark_heightfield,
    benchmark_single_chunk,
    benchmark_materialize_world,
    benchmark_streaming_walk,
    benchmark_blocks_in_area,
);

criterion_main!(benches);
