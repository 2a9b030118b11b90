//! Route planning over an annotated network
//!
//! Four variants share one best-first search: plain distance,
//! risk-weighted distance, risk-weighted with an A* heuristic, and
//! risk-filtered distance. All run against the same immutable snapshot
//! and can be fanned out in parallel.

pub mod dijkstra;
mod planner;
mod route_result;

pub use planner::{route, route_all};
pub use route_result::RouteResult;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::EdgeId;

/// Planner variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Distance,
    RiskWeighted,
    RiskWeightedAstar,
    Filtered,
}

impl Algorithm {
    /// All variants, in the order `route_all` reports them.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Distance,
        Algorithm::RiskWeighted,
        Algorithm::RiskWeightedAstar,
        Algorithm::Filtered,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Distance => "distance",
            Algorithm::RiskWeighted => "risk_weighted",
            Algorithm::RiskWeightedAstar => "risk_weighted_astar",
            Algorithm::Filtered => "filtered",
        }
    }
}

/// Request coordinate in the network's reference system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<LatLon> for Point<f64> {
    fn from(value: LatLon) -> Self {
        Point::new(value.lon, value.lat)
    }
}

/// One route request as delivered by the calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: LatLon,
    pub end: LatLon,
    pub algorithm: Algorithm,
    /// Edges with a known narrower width are ineligible in every
    /// variant.
    #[serde(default)]
    pub vehicle_width_m: Option<f64>,
    /// Overrides [`crate::DEFAULT_RISK_THRESHOLD`] for the filtered
    /// variant.
    #[serde(default)]
    pub risk_threshold: Option<f64>,
    /// Overrides [`crate::DEFAULT_RISK_FACTOR`] `k` for the
    /// risk-weighted variants.
    #[serde(default)]
    pub risk_factor: Option<f64>,
    /// Edges to treat as already failed; used for what-if re-routing
    /// under simulated scenarios.
    #[serde(default)]
    pub excluded_edges: Vec<EdgeId>,
}

impl RouteRequest {
    pub fn new(start: LatLon, end: LatLon, algorithm: Algorithm) -> Self {
        Self {
            start,
            end,
            algorithm,
            vehicle_width_m: None,
            risk_threshold: None,
            risk_factor: None,
            excluded_edges: Vec::new(),
        }
    }
}

/// Cooperative cancellation handle, checked at every queue pop.
///
/// Cloning shares the flag; the calling layer raises it to abandon an
/// in-flight search, which then fails with [`crate::Error::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
