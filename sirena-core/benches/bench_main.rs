//! Planner and aggregation benchmarks over a synthetic city grid

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use sirena_core::prelude::*;

const GRID: i64 = 40;
const SPACING_DEG: f64 = 0.000_9; // ~100 m

fn grid_snapshot() -> NetworkSnapshot {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let node_id = |x: i64, y: i64| x * GRID + y;

    for x in 0..GRID {
        for y in 0..GRID {
            nodes.push(NodeRecord {
                id: node_id(x, y),
                lon: x as f64 * SPACING_DEG,
                lat: y as f64 * SPACING_DEG,
            });
        }
    }
    let mut edge_id = 0;
    for x in 0..GRID {
        for y in 0..GRID {
            for (nx, ny) in [(x + 1, y), (x, y + 1)] {
                if nx < GRID && ny < GRID {
                    edges.push(EdgeRecord {
                        id: edge_id,
                        source: node_id(x, y),
                        target: node_id(nx, ny),
                        polyline: vec![],
                        length_m: 100.0,
                        oneway: false,
                        attrs: Default::default(),
                    });
                    edge_id += 1;
                }
            }
        }
    }
    NetworkSnapshot { nodes, edges }
}

fn corner_request(algorithm: Algorithm) -> RouteRequest {
    RouteRequest::new(
        LatLon { lat: 0.0, lon: 0.0 },
        LatLon {
            lat: (GRID - 1) as f64 * SPACING_DEG,
            lon: (GRID - 1) as f64 * SPACING_DEG,
        },
        algorithm,
    )
}

fn bench_routing(c: &mut Criterion) {
    let network = Arc::new(build_road_network(&grid_snapshot()).unwrap());
    let hazards: Vec<Hazard> = Vec::new();
    let annotated = annotate(Arc::clone(&network), &hazards, &ThreatPolicy::default());

    c.bench_function("grid_build", |b| {
        let snapshot = grid_snapshot();
        b.iter(|| build_road_network(&snapshot).unwrap());
    });

    c.bench_function("dijkstra_distance_40x40", |b| {
        let request = corner_request(Algorithm::Distance);
        b.iter(|| route(&annotated, &request, None).unwrap());
    });

    c.bench_function("astar_risk_weighted_40x40", |b| {
        let request = corner_request(Algorithm::RiskWeightedAstar);
        b.iter(|| route(&annotated, &request, None).unwrap());
    });

    c.bench_function("sample_scenarios_100", |b| {
        b.iter(|| sample_scenarios(&annotated, 100, 42));
    });
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
