use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use graphstats::{
    Graph, cache,
    generators::{erdos_renyi, scale_free},
    stats::{
        Target, centrality, clustering, components, edge_betweenness::edge_betweenness_all,
    },
    threshold::{PathSharingRemoval, threshold_components},
};
use rand::{SeedableRng, rngs::StdRng};

const ER_SEED: u64 = 0x99AA;
const SF_SEED: u64 = 0x77CC;
const SAMPLE_SIZE: usize = 10;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

struct ReadyGraph {
    label: String,
    graph: Graph,
}

fn bench_scales() -> &'static [u32] {
    #[cfg(feature = "bench-ci")]
    {
        &[100, 200]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[200, 500, 1_000]
    }
}

fn cases() -> Vec<ReadyGraph> {
    let mut cases = Vec::new();
    for &nodes in bench_scales() {
        let density = 8.0 / f64::from(nodes - 1);
        let er = erdos_renyi(nodes, density, &mut StdRng::seed_from_u64(ER_SEED)).expect("er");
        cases.push(ReadyGraph {
            label: format!("er_{nodes}"),
            graph: er,
        });
        let sf = scale_free(nodes, 4, &mut StdRng::seed_from_u64(SF_SEED)).expect("sf");
        cases.push(ReadyGraph {
            label: format!("sf_{nodes}"),
            graph: sf,
        });
    }
    cases
}

fn bench_components(c: &mut Criterion) {
    let cases = cases();
    let mut group = c.benchmark_group("components");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(&case.label), &case.graph, |b, graph| {
            b.iter(|| components::label_components(graph).expect("components"));
        });
    }
    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let cases = cases();
    let mut group = c.benchmark_group("clustering");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(&case.label), &case.graph, |b, graph| {
            b.iter(|| clustering::clustering(graph, Target::All).expect("clustering"));
        });
    }
    group.finish();
}

fn bench_edge_betweenness(c: &mut Criterion) {
    let cases = cases();
    let mut group = c.benchmark_group("edge_betweenness");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(&case.label), &case.graph, |b, graph| {
            b.iter(|| edge_betweenness_all(graph).expect("edge betweenness"));
        });
    }
    group.finish();
}

fn bench_cached_betweenness(c: &mut Criterion) {
    let mut group = c.benchmark_group("betweenness_cached");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    let nodes = bench_scales()[0];
    let mut graph =
        erdos_renyi(nodes, 8.0 / f64::from(nodes - 1), &mut StdRng::seed_from_u64(ER_SEED)).expect("er");
    cache::init(&mut graph);
    group.bench_function(BenchmarkId::from_parameter(nodes), |b| {
        b.iter(|| centrality::betweenness(&graph, Target::Single(0)).expect("betweenness"));
    });
    group.finish();
}

fn bench_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold_components");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    let nodes = bench_scales()[0];
    let graph = scale_free(nodes, 2, &mut StdRng::seed_from_u64(SF_SEED)).expect("sf");
    group.bench_function(BenchmarkId::from_parameter(nodes), |b| {
        b.iter(|| {
            let mut strategy = PathSharingRemoval::new();
            threshold_components(&graph, &mut strategy, 4, 1).expect("threshold")
        });
    });
    group.finish();
}

criterion_group!(
    name = algorithm_benches;
    config = Criterion::default();
    targets = bench_components, bench_clustering, bench_edge_betweenness, bench_cached_betweenness, bench_threshold
);
criterion_main!(algorithm_benches);
