use chrono::{TimeZone, Utc};
use corridormap::components::{components_by_search, extract_components};
use corridormap::core::{Edge, Element, Geometry};
use corridormap::pipeline::{AggregationParams, Aggregator};
use corridormap::spatial::METERS_PER_DEGREE;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const LAT: f64 = 28.6;
const LON: f64 = 77.2;

fn at(east_m: f64, north_m: f64) -> [f64; 2] {
    [
        LON + east_m / (METERS_PER_DEGREE * LAT.to_radians().cos()),
        LAT + north_m / METERS_PER_DEGREE,
    ]
}

/// Street grid: `side` east-west rows of `side` blocks, 80 m per block.
fn street_grid(side: usize) -> Vec<Element> {
    let mut elements = Vec::with_capacity(side * side);
    for row in 0..side {
        for col in 0..side {
            let x = col as f64 * 80.0;
            let y = row as f64 * 80.0;
            // Deterministic spread of priorities across [0, 1)
            let priority = ((row * 31 + col * 17) % 100) as f64 / 100.0;
            elements.push(
                Element::new(
                    format!("seg-{}-{}", row, col),
                    Geometry::LineString(vec![at(x, y), at(x + 80.0, y)]),
                )
                .with_priority(priority),
            );
        }
    }
    elements
}

fn sample_points(side: usize) -> Vec<Element> {
    (0..side * side)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            let priority = ((row * 13 + col * 7) % 100) as f64 / 100.0;
            Element::new(
                format!("pt-{}", i),
                Geometry::Point(at(col as f64 * 25.0, row as f64 * 25.0)),
            )
            .with_priority(priority)
        })
        .collect()
}

fn bench_segment_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_aggregation");
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let params = AggregationParams::segment(0.5, 10.0, 200.0);

    for side in [20, 50, 100] {
        let elements = street_grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &elements, |b, elements| {
            b.iter(|| {
                Aggregator::default()
                    .run(black_box(elements), &params, created_at)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_point_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_aggregation");
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let params = AggregationParams::point(0.5, 30.0, 3);

    for side in [30, 100] {
        let elements = sample_points(side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &elements, |b, elements| {
            b.iter(|| {
                Aggregator::default()
                    .run(black_box(elements), &params, created_at)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_component_extraction(c: &mut Criterion) {
    let n = 100_000;
    let nodes: Vec<usize> = (0..n).collect();
    let edges: Vec<Edge> = (0..n - 1)
        .filter(|i| i % 7 != 0)
        .map(|i| Edge::new(i, i + 1))
        .collect();

    c.bench_function("union_find_100k", |b| {
        b.iter(|| extract_components(black_box(&nodes), black_box(&edges)))
    });
    c.bench_function("breadth_first_100k", |b| {
        b.iter(|| components_by_search(black_box(n), black_box(&edges)))
    });
}

criterion_group!(
    benches,
    bench_segment_aggregation,
    bench_point_aggregation,
    bench_component_extraction
);
criterion_main!(benches);
