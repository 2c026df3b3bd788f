//! Criterion benchmarks for u-precedence.
//!
//! Uses synthetic acyclic request sets over random node orders to measure
//! oracle checks and move trials independent of any routing cost model.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use u_precedence::moves::{FeasibilityCheck, MoveConfig};
use u_precedence::{CompactConstraintIndex, FeasibilitySource, MoveEngine, NodeId, Request};

// ===========================================================================
// Instance generation
// ===========================================================================

/// `n` nodes in a random order with `n / 2` forward pickup/delivery pairs,
/// so the returned order is feasible.
fn instance(n: usize, seed: u64) -> (CompactConstraintIndex, Vec<NodeId>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<NodeId> = (0..n as NodeId).collect();
    order.shuffle(&mut rng);

    let mut index = CompactConstraintIndex::new();
    for k in 0..n / 2 {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a != b {
            index.add_request(Request::new(k as i64, order[a.min(b)], order[a.max(b)]));
        }
    }
    (index, order)
}

// ===========================================================================
// Oracle
// ===========================================================================

fn bench_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("oracle");
    for &n in &[50usize, 200, 1000] {
        let (index, order) = instance(n, 42);
        group.bench_with_input(BenchmarkId::new("is_sequence_feasible", n), &n, |b, _| {
            b.iter(|| black_box(index.is_sequence_feasible(black_box(&order))))
        });
    }
    group.finish();
}

// ===========================================================================
// Move trials: full vs incremental
// ===========================================================================

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("moves");
    for &n in &[50usize, 200, 1000] {
        let (index, order) = instance(n, 7);
        for (name, check) in [
            ("full", FeasibilityCheck::Full),
            ("incremental", FeasibilityCheck::Incremental),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, &n| {
                let config = MoveConfig::default().with_check(check);
                let mut engine = MoveEngine::with_config(&index, order.clone(), config)
                    .expect("generated order is a permutation");
                let mut rng = StdRng::seed_from_u64(1);
                b.iter(|| {
                    let i = rng.random_range(0..n);
                    let j = rng.random_range(0..n);
                    black_box(engine.apply_swap(i, j));
                    black_box(engine.apply_insertion(j, i));
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_oracle, bench_moves);
criterion_main!(benches);
