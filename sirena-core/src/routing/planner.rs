use std::time::Instant;

use fixedbitset::FixedBitSet;
use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use log::debug;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::dijkstra::{best_first_search, SearchPath};
use super::route_result::RouteResult;
use super::{Algorithm, CancelFlag, RouteRequest};
use crate::model::{AnnotatedNetwork, RoadEdge};
use crate::{Error, DEFAULT_RISK_FACTOR, DEFAULT_RISK_THRESHOLD, MAX_SNAP_DISTANCE_M};

/// Computes one route for the request's algorithm variant.
///
/// # Errors
///
/// `NoNearbyNode` when a request coordinate cannot be snapped,
/// `NoPath` when the endpoints are disconnected, `NoSafePath` when only
/// the risk filter makes them disconnected, `Cancelled` when the flag
/// is raised mid-search.
pub fn route(
    annotated: &AnnotatedNetwork,
    request: &RouteRequest,
    cancel: Option<&CancelFlag>,
) -> Result<RouteResult, Error> {
    let started = Instant::now();
    let network = annotated.network();

    let start = network.nearest_node(Point::from(request.start), MAX_SNAP_DISTANCE_M)?;
    let goal = network.nearest_node(Point::from(request.end), MAX_SNAP_DISTANCE_M)?;

    let excluded = excluded_set(annotated, request);
    let width = request.vehicle_width_m;
    let base_eligible = move |slot: usize, edge: &RoadEdge| {
        !excluded.contains(slot) && width.is_none_or(|w| edge.admits_width(w))
    };

    let k = request.risk_factor.unwrap_or(DEFAULT_RISK_FACTOR);
    let threshold = request.risk_threshold.unwrap_or(DEFAULT_RISK_THRESHOLD);
    let goal_point = network.node(goal).geometry;

    let found = match request.algorithm {
        Algorithm::Distance => best_first_search(
            annotated,
            start,
            goal,
            |edge, _| edge.base_cost,
            |_| 0.0,
            |slot, edge, _| base_eligible(slot, edge),
            cancel,
        )?,
        Algorithm::RiskWeighted => best_first_search(
            annotated,
            start,
            goal,
            move |edge, p| edge.base_cost * (1.0 + k * p),
            |_| 0.0,
            |slot, edge, _| base_eligible(slot, edge),
            cancel,
        )?,
        Algorithm::RiskWeightedAstar => {
            // Every meter costs at least (1 + k * min observed
            // probability), so the scaled straight-line estimate stays
            // admissible while pruning harder than plain distance.
            let floor = 1.0 + k * annotated.min_edge_fail_prob();
            best_first_search(
                annotated,
                start,
                goal,
                move |edge, p| edge.base_cost * (1.0 + k * p),
                move |node| Haversine.distance(network.node(node).geometry, goal_point) * floor,
                |slot, edge, _| base_eligible(slot, edge),
                cancel,
            )?
        }
        Algorithm::Filtered => {
            let found = best_first_search(
                annotated,
                start,
                goal,
                |edge, _| edge.base_cost,
                |_| 0.0,
                |slot, edge, p| base_eligible(slot, edge) && p < threshold,
                cancel,
            )?;
            if found.is_none() {
                // Unreachable at all, or only unreachable safely?
                let unfiltered = best_first_search(
                    annotated,
                    start,
                    goal,
                    |edge, _| edge.base_cost,
                    |_| 0.0,
                    |slot, edge, _| base_eligible(slot, edge),
                    cancel,
                )?;
                return Err(if unfiltered.is_some() {
                    Error::NoSafePath
                } else {
                    Error::NoPath
                });
            }
            found
        }
    };

    let path = found.ok_or(Error::NoPath)?;
    let result = assemble(annotated, request.algorithm, start, path, started);
    debug!(
        "{} route: {} edges, {:.0} m, cost {:.0}",
        result.algorithm.name(),
        result.edges.len(),
        result.total_length_m,
        result.total_cost
    );
    Ok(result)
}

/// Runs all four variants against the same snapshot in parallel and
/// reports them in [`Algorithm::ALL`] order. An embarrassingly parallel
/// fan-out; the snapshot is immutable and shared.
pub fn route_all(
    annotated: &AnnotatedNetwork,
    request: &RouteRequest,
    cancel: Option<&CancelFlag>,
) -> Vec<Result<RouteResult, Error>> {
    Algorithm::ALL
        .into_par_iter()
        .map(|algorithm| {
            let mut variant = request.clone();
            variant.algorithm = algorithm;
            route(annotated, &variant, cancel)
        })
        .collect()
}

fn excluded_set(annotated: &AnnotatedNetwork, request: &RouteRequest) -> FixedBitSet {
    let network = annotated.network();
    let mut excluded = FixedBitSet::with_capacity(network.edge_count());
    for id in &request.excluded_edges {
        match network.edge_slot(*id) {
            Some(slot) => excluded.insert(slot),
            None => debug!("excluded edge {id} not present in network"),
        }
    }
    excluded
}

fn assemble(
    annotated: &AnnotatedNetwork,
    algorithm: Algorithm,
    start: NodeIndex,
    path: SearchPath,
    started: Instant,
) -> RouteResult {
    let network = annotated.network();
    let mut edges = Vec::with_capacity(path.hops.len());
    let mut coords: Vec<geo::Coord<f64>> = Vec::new();
    let mut total_length_m = 0.0;

    let mut prev = start;
    for &(slot, node) in &path.hops {
        let edge = network.edge(slot);
        edges.push(edge.id);
        total_length_m += edge.length_m;

        let forward = network.node(prev).id == edge.source;
        if forward {
            coords.extend(edge.geometry.coords().copied());
        } else {
            coords.extend(edge.geometry.coords().rev().copied());
        }
        prev = node;
    }
    // Segment joints repeat where edges meet; collapse them.
    let mut coords: Vec<_> = coords.into_iter().dedup().collect();
    if coords.is_empty() {
        // Degenerate request: start and goal snapped to the same node.
        coords.push(network.node(start).geometry.0);
    }

    RouteResult {
        algorithm,
        edges,
        geometry: coords.into(),
        total_length_m,
        total_cost: path.cost,
        compute_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        start_node: network.node(start).id,
        end_node: network.node(prev).id,
    }
}
