//! Netting throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ledger_core::NetBalance;
use rust_decimal::Decimal;
use settlement::{NettingConfig, NettingEngine, NettingStrategy};

/// Deterministic zero-sum balances for `members` participants
fn balances(members: usize) -> Vec<NetBalance> {
    let mut cents: Vec<i64> = (0..members.saturating_sub(1))
        .map(|i| ((i as i64 * 7_919) % 20_011) - 10_005)
        .collect();
    cents.push(-cents.iter().sum::<i64>());

    cents
        .into_iter()
        .enumerate()
        .map(|(i, c)| NetBalance::new(format!("member-{:04}", i), Decimal::new(c, 2)))
        .collect()
}

fn bench_greedy(c: &mut Criterion) {
    let engine = NettingEngine::default();
    let mut group = c.benchmark_group("greedy");

    for members in [10usize, 100, 1_000] {
        let input = balances(members);
        group.bench_with_input(BenchmarkId::from_parameter(members), &input, |b, input| {
            b.iter(|| engine.optimize(black_box(input)))
        });
    }

    group.finish();
}

fn bench_exact(c: &mut Criterion) {
    let engine = NettingEngine::new(
        NettingConfig {
            strategy: NettingStrategy::Exact,
            exact_max_participants: 12,
        },
        Decimal::new(1, 2),
    );
    let mut group = c.benchmark_group("exact");

    for members in [4usize, 8, 12] {
        let input = balances(members);
        group.bench_with_input(BenchmarkId::from_parameter(members), &input, |b, input| {
            b.iter(|| engine.optimize(black_box(input)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_greedy, bench_exact);
criterion_main!(benches);
