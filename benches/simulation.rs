//! Benchmarks for shape sampling and the per-frame particle update.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use morphcloud::gesture::MAX_FINGERTIPS;
use morphcloud::shape::{self, ShapeKind};
use morphcloud::{GestureSignal, ParticleSimulator, SimulationConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const COUNT: usize = 15_000;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for kind in ShapeKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            let mut rng = SmallRng::seed_from_u64(7);
            let mut buffer = Vec::with_capacity(COUNT);
            b.iter(|| {
                shape::fill(kind, &mut buffer, COUNT, &mut rng);
                black_box(buffer.len())
            })
        });
    }

    group.finish();
}

fn open_hand() -> GestureSignal {
    GestureSignal {
        hand_present: true,
        hand_position: Vec2::new(0.2, -0.1),
        closed_strength: 0.4,
        fingertips: (0..MAX_FINGERTIPS)
            .map(|i| Vec3::new(-0.4 + 0.2 * i as f32, 0.3, -0.05))
            .collect(),
        pinch_active: false,
    }
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    let config = SimulationConfig::default().with_particle_count(COUNT).with_seed(11);

    group.bench_function("no_hand", |b| {
        let mut sim = ParticleSimulator::new(&config).unwrap();
        let rest = GestureSignal::rest();
        b.iter(|| {
            sim.advance(black_box(&rest));
            black_box(sim.positions().len())
        })
    });

    group.bench_function("hand_five_fingertips", |b| {
        let mut sim = ParticleSimulator::new(&config).unwrap();
        let hand = open_hand();
        b.iter(|| {
            sim.advance(black_box(&hand));
            black_box(sim.positions().len())
        })
    });

    group.bench_function("shape_switch", |b| {
        let mut sim = ParticleSimulator::new(&config).unwrap();
        let mut toggle = false;
        b.iter(|| {
            toggle = !toggle;
            sim.set_shape(if toggle { ShapeKind::Galaxy } else { ShapeKind::Dna });
            black_box(sim.targets().len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_advance);
criterion_main!(benches);
