use std::hash::BuildHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;
use tally_hash::TallyOps;
use tally_hash::TallyTable;
use tally_hash::counter::DEFAULT_LOAD_FACTOR;
use tally_hash::counter::DEFAULT_SCHEDULE;

struct SipOps;

impl TallyOps<String> for SipOps {
    fn hash_value(&self, value: &String) -> u64 {
        let mut hasher = SipHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn equivalent(&self, a: &String, b: &String) -> bool {
        a == b
    }
}

#[derive(Default, Clone)]
struct SipHashBuilder;

impl BuildHasher for SipHashBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

const SIZES: &[usize] = &[(1 << 10), (1 << 12), (1 << 14), (1 << 16)];

fn distinct_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key_{i:016X}")).collect()
}

/// Duplicate-heavy workload: `count` insertions drawn Zipf-distributed from a
/// key space of `count` ids, so a few hot keys dominate the tallies.
fn zipf_keys(count: usize) -> Vec<String> {
    let mut rng = SmallRng::from_os_rng();
    let distr = Zipf::new(count as f32, 1.0).unwrap();
    (0..count)
        .map(|_| {
            let id = rng.sample(distr) as u64;
            format!("key_{id:016X}")
        })
        .collect()
}

fn bench_tally_distinct(c: &mut Criterion) {
    let mut group = c.benchmark_group("tally_distinct");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = distinct_keys(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("tally_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut table =
                        TallyTable::new(SipOps, DEFAULT_SCHEDULE, DEFAULT_LOAD_FACTOR);
                    for key in keys {
                        black_box(table.add(key).frequency());
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("hashbrown_count_map/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut map: HashbrownMap<String, u64, SipHashBuilder> =
                        HashbrownMap::with_hasher(SipHashBuilder);
                    for key in keys {
                        *map.entry(key).or_insert(0) += 1;
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_tally_zipf(c: &mut Criterion) {
    let mut group = c.benchmark_group("tally_zipf");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = zipf_keys(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("tally_hash/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut table =
                        TallyTable::new(SipOps, DEFAULT_SCHEDULE, DEFAULT_LOAD_FACTOR);
                    for key in keys {
                        black_box(table.add(key).frequency());
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("hashbrown_count_map/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map: HashbrownMap<String, u64, SipHashBuilder> =
                        HashbrownMap::with_hasher(SipHashBuilder);
                    for key in keys {
                        *map.entry(key).or_insert(0) += 1;
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = distinct_keys(size);

        let mut table = TallyTable::new(SipOps, DEFAULT_SCHEDULE, DEFAULT_LOAD_FACTOR);
        for key in keys.iter().cloned() {
            table.add(key);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("tally_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut probes = keys.clone();
                    probes.shuffle(&mut SmallRng::from_os_rng());
                    probes
                },
                |probes| {
                    for probe in &probes {
                        black_box(table.frequency(probe));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");

    for &size in SIZES {
        let mut table = TallyTable::new(SipOps, DEFAULT_SCHEDULE, DEFAULT_LOAD_FACTOR);
        for key in distinct_keys(size) {
            table.add(key);
        }

        group.throughput(Throughput::Elements(table.capacity() as u64));
        group.bench_function(format!("scan/{size}"), |b| {
            b.iter(|| black_box(table.metrics()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tally_distinct,
    bench_tally_zipf,
    bench_lookup,
    bench_metrics
);
criterion_main!(benches);
