//! Resilient route planning for emergency vehicles over degraded road
//! networks.
//!
//! The engine is built from four pieces: an immutable road [`model`]
//! constructed once per network snapshot, a [`threat`] aggregator that
//! folds hazard records into per-edge failure probabilities, a family of
//! [`routing`] algorithms over the annotated graph, and a Monte-Carlo
//! failure [`sim`]ulator for stress-testing routes.
//!
//! All value types are immutable after construction and safe to share
//! across concurrent searches; `annotate` produces a fresh
//! [`AnnotatedNetwork`] rather than mutating in place.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod sim;
pub mod threat;

pub use error::Error;

/// External node identifier from the network snapshot.
pub type NodeId = i64;
/// External edge identifier from the network snapshot.
pub type EdgeId = i64;

/// Furthest a request coordinate may sit from the nearest network node
/// before snapping fails with [`Error::NoNearbyNode`].
pub const MAX_SNAP_DISTANCE_M: f64 = 500.0;

/// Risk inflation factor `k` in `length * (1 + k * fail_prob)`.
pub const DEFAULT_RISK_FACTOR: f64 = 10.0;

/// Edges at or above this failure probability are dropped by the
/// filtered planner variant.
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.5;

pub use model::{AnnotatedNetwork, RoadEdge, RoadNetwork, RoadNode};
pub use threat::{Hazard, HazardGeometry, HazardKind, HazardSubtype, ThreatPolicy, annotate};
