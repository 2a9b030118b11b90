//! Route resilience under random failure scenarios
//!
//! Stress-tests an origin-destination pair: sample failure scenarios
//! from the annotated probabilities, re-route with each scenario's
//! failed edges excluded, and report how often the pair stays reachable
//! and how long the detours get.

use log::info;
use rayon::prelude::*;

use crate::model::AnnotatedNetwork;
use crate::routing::{route, Algorithm, CancelFlag, RouteRequest};
use crate::sim::sample_scenarios;
use crate::Error;

#[derive(Debug, Clone)]
pub struct ResilienceReport {
    /// Length of the unperturbed distance route, meters.
    pub baseline_length_m: f64,
    pub scenarios: usize,
    /// Scenarios in which the pair stayed connected.
    pub reachable: usize,
    /// Mean extra length over the baseline among reachable scenarios,
    /// meters; zero when nothing was reachable.
    pub mean_detour_m: f64,
    /// Worst detour among reachable scenarios, meters.
    pub max_detour_m: f64,
}

/// Evaluates expected detour length under `n` random failure draws.
///
/// Scenarios are routed with the distance variant so detours measure
/// length, not risk weighting. Per-scenario searches run in parallel
/// against the shared snapshot.
///
/// # Errors
///
/// Fails like [`route`] does for the baseline request; scenario
/// routes that end in `NoPath` count as unreachable rather than
/// failing the evaluation.
pub fn evaluate_resilience(
    annotated: &AnnotatedNetwork,
    request: &RouteRequest,
    n: usize,
    seed: u64,
    cancel: Option<&CancelFlag>,
) -> Result<ResilienceReport, Error> {
    let mut baseline_request = request.clone();
    baseline_request.algorithm = Algorithm::Distance;
    let baseline = route(annotated, &baseline_request, cancel)?;

    let scenarios = sample_scenarios(annotated, n, seed);
    let outcomes: Result<Vec<Option<f64>>, Error> = scenarios
        .par_iter()
        .map(|scenario| {
            let mut perturbed = baseline_request.clone();
            perturbed
                .excluded_edges
                .extend_from_slice(&scenario.failed_edges);
            match route(annotated, &perturbed, cancel) {
                Ok(result) => Ok(Some(result.total_length_m)),
                Err(Error::NoPath | Error::NoSafePath) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .collect();
    let outcomes = outcomes?;

    let reachable: Vec<f64> = outcomes.into_iter().flatten().collect();
    let detours: Vec<f64> = reachable
        .iter()
        .map(|len| (len - baseline.total_length_m).max(0.0))
        .collect();

    let report = ResilienceReport {
        baseline_length_m: baseline.total_length_m,
        scenarios: n,
        reachable: reachable.len(),
        mean_detour_m: if detours.is_empty() {
            0.0
        } else {
            detours.iter().sum::<f64>() / detours.len() as f64
        },
        max_detour_m: detours.iter().copied().fold(0.0, f64::max),
    };
    info!(
        "Resilience: {}/{} scenarios reachable, mean detour {:.0} m",
        report.reachable, report.scenarios, report.mean_detour_m
    );
    Ok(report)
}
