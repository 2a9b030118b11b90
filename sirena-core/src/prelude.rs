// Re-export key components
pub use crate::algo::{evaluate_resilience, ResilienceReport};
pub use crate::loading::{build_road_network, EdgeRecord, NetworkSnapshot, NodeRecord};
pub use crate::model::{AnnotatedNetwork, EdgeAttrs, RoadEdge, RoadNetwork, RoadNode};
pub use crate::routing::{
    route, route_all, Algorithm, CancelFlag, LatLon, RouteRequest, RouteResult,
};
pub use crate::sim::{generate_demo_hazards, sample_scenarios, Scenario};
pub use crate::threat::{
    annotate, hazards_from_feed, Hazard, HazardGeometry, HazardKind, HazardSubtype, SeverityCurve,
    ThreatPolicy,
};

// Core identifier and tuning types
pub use crate::Error;
pub use crate::{EdgeId, NodeId};
pub use crate::{DEFAULT_RISK_FACTOR, DEFAULT_RISK_THRESHOLD, MAX_SNAP_DISTANCE_M};
