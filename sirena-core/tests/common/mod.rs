//! Shared fixtures: a small grid-free network with a risky corridor and
//! a longer safe detour.

use std::sync::Arc;

use geo::Point;
use geojson::{Feature, Geometry, Value};
use serde_json::{json, Map};

use sirena_core::prelude::*;

/// Degrees of longitude per 100 m at the equator, roughly.
pub const DEG_100M: f64 = 0.000_9;

pub fn node(id: NodeId, lon: f64, lat: f64) -> NodeRecord {
    NodeRecord { id, lon, lat }
}

pub fn edge(id: EdgeId, source: NodeId, target: NodeId, length_m: f64) -> EdgeRecord {
    EdgeRecord {
        id,
        source,
        target,
        polyline: vec![],
        length_m,
        oneway: false,
        attrs: Default::default(),
    }
}

/// A corridor A(1)-B(2)-C(3)-D(4) of 100 m edges on the equator, plus a
/// detour B-E(5)-C whose two legs are 250 m each (detour path length
/// 500 m). Edge ids: 10 (A-B), 20 (B-C), 30 (C-D), 40 (B-E), 50 (E-C).
pub fn corridor_network() -> Arc<RoadNetwork> {
    let snapshot = NetworkSnapshot {
        nodes: vec![
            node(1, 0.0, 0.0),
            node(2, DEG_100M, 0.0),
            node(3, 2.0 * DEG_100M, 0.0),
            node(4, 3.0 * DEG_100M, 0.0),
            node(5, 1.5 * DEG_100M, 2.0 * DEG_100M),
        ],
        edges: vec![
            edge(10, 1, 2, 100.0),
            edge(20, 2, 3, 100.0),
            edge(30, 3, 4, 100.0),
            edge(40, 2, 5, 250.0),
            edge(50, 5, 3, 250.0),
        ],
    };
    Arc::new(build_road_network(&snapshot).unwrap())
}

/// Point hazard feature centered on the B-C edge midpoint.
pub fn hazard_at_bc(kind: &str, subtype: &str, severity: f64) -> Hazard {
    hazard_at(1.5 * DEG_100M, 0.0, kind, subtype, severity)
}

pub fn hazard_at(lon: f64, lat: f64, kind: &str, subtype: &str, severity: f64) -> Hazard {
    let mut properties = Map::new();
    properties.insert("ext_id".into(), json!(format!("{kind}:{subtype}")));
    properties.insert("source".into(), json!("test"));
    properties.insert("kind".into(), json!(kind));
    properties.insert("subtype".into(), json!(subtype));
    properties.insert("severity".into(), json!(severity));
    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&Point::new(lon, lat)))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };
    Hazard::from_feature(&feature).unwrap()
}

pub fn latlon(lat: f64, lon: f64) -> LatLon {
    LatLon { lat, lon }
}

/// Request from A to D.
pub fn corridor_request(algorithm: Algorithm) -> RouteRequest {
    RouteRequest::new(
        latlon(0.0, 0.0),
        latlon(0.0, 3.0 * DEG_100M),
        algorithm,
    )
}
