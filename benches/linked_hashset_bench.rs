use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use linked_hashset::LinkedHashSet;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_add_10k(c: &mut Criterion) {
    // Includes every doubling rebuild on the way up from the floor.
    c.bench_function("linked_hashset_add_10k", |b| {
        b.iter_batched(
            LinkedHashSet::<String>::new,
            |mut s| {
                for x in lcg(1).take(10_000) {
                    s.add(key(x)).unwrap();
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_contains_hit(c: &mut Criterion) {
    c.bench_function("linked_hashset_contains_hit", |b| {
        let mut s = LinkedHashSet::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for k in &keys {
            s.add(k.clone()).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(s.contains(k.as_str()));
        })
    });
}

fn bench_contains_miss(c: &mut Criterion) {
    c.bench_function("linked_hashset_contains_miss", |b| {
        let mut s = LinkedHashSet::new();
        for x in lcg(11).take(10_000) {
            s.add(key(x)).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the set
            let k = key(miss.next().unwrap());
            black_box(s.contains(k.as_str()));
        })
    });
}

fn bench_iter_in_order(c: &mut Criterion) {
    c.bench_function("linked_hashset_iter_10k", |b| {
        let mut s = LinkedHashSet::new();
        for x in lcg(13).take(10_000) {
            s.add(key(x)).unwrap();
        }
        b.iter(|| black_box(s.iter().count()))
    });
}

fn bench_churn_steady(c: &mut Criterion) {
    // Load factor sits mid-band after setup, so the add/remove pair never
    // crosses a resize threshold; this measures pure link bookkeeping.
    c.bench_function("linked_hashset_churn_steady", |b| {
        let mut s = LinkedHashSet::new();
        for x in lcg(17).take(10_000) {
            s.add(key(x)).unwrap();
        }
        let churn_key = "churn".to_string(); // distinct format, never collides with key()
        b.iter(|| {
            s.add(churn_key.clone()).unwrap();
            let back = s.remove(churn_key.as_str()).unwrap();
            black_box(back);
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_add_10k, bench_contains_hit, bench_contains_miss, bench_iter_in_order, bench_churn_steady
}
criterion_main!(benches);
