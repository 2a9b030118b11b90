//! Threat aggregation: hazards in, per-edge failure probabilities out
//!
//! An edge's final probability is the maximum of all contributions that
//! influence it, never the sum - one worst threat caps the value and
//! many weak co-located threats cannot saturate an edge. Node
//! probabilities follow the same rule over hazards influencing either
//! endpoint.

use std::sync::Arc;

use geo::{BoundingRect, Closest, ClosestPoint, Distance, Haversine, Intersects, Point};
use log::{debug, info, warn};
use rstar::{RTree, RTreeObject, AABB};

use super::{Hazard, HazardGeometry, ThreatPolicy};
use crate::model::{AnnotatedNetwork, RoadNetwork};

/// Meters per degree of latitude, and of longitude at the equator.
const METERS_PER_DEGREE: f64 = 111_320.0;

struct EdgeEnvelope {
    bbox: AABB<[f64; 2]>,
    slot: usize,
}

impl RTreeObject for EdgeEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bbox
    }
}

/// Computes a fresh probability overlay for the given hazard list.
///
/// Re-running with a new list fully replaces prior probabilities; there
/// is no carry-over state. Hazards with malformed geometry are logged
/// and skipped so one bad record cannot abort the pass.
pub fn annotate(
    network: Arc<RoadNetwork>,
    hazards: &[Hazard],
    policy: &ThreatPolicy,
) -> AnnotatedNetwork {
    let mut edge_probs = vec![0.0_f64; network.edge_count()];
    let mut node_probs = vec![0.0_f64; network.node_count()];

    // Spatial index over edge envelopes, built once per pass.
    let index = RTree::bulk_load(
        network
            .edges()
            .iter()
            .enumerate()
            .filter_map(|(slot, edge)| {
                edge.geometry.bounding_rect().map(|rect| EdgeEnvelope {
                    bbox: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                    slot,
                })
            })
            .collect(),
    );

    let mut skipped = 0usize;
    for hazard in hazards {
        if let Err(e) = hazard.geometry.validate() {
            warn!("skipping hazard {:?} from {}: {e}", hazard.id, hazard.source);
            skipped += 1;
            continue;
        }

        let contribution = policy.contribution(hazard);
        if contribution <= 0.0 {
            continue;
        }
        let radius_m = policy.influence_radius_m(hazard.kind);

        let query = match hazard_envelope(&hazard.geometry, radius_m) {
            Some(envelope) => envelope,
            None => continue,
        };

        let mut influenced = 0usize;
        for candidate in index.locate_in_envelope_intersecting(&query) {
            let edge = network.edge(candidate.slot);
            if !influences(&hazard.geometry, &edge.geometry, radius_m) {
                continue;
            }
            influenced += 1;
            apply_max(&mut edge_probs[candidate.slot], contribution);
            if let Some(a) = network.node_by_id(edge.source) {
                apply_max(&mut node_probs[a.index()], contribution);
            }
            if let Some(b) = network.node_by_id(edge.target) {
                apply_max(&mut node_probs[b.index()], contribution);
            }
        }
        debug!(
            "hazard {:?} ({:?}/{:?}) influences {influenced} edges at p={contribution:.2}",
            hazard.id, hazard.kind, hazard.subtype
        );
    }

    let affected = edge_probs.iter().filter(|&&p| p > 0.0).count();
    info!(
        "Annotation pass: {} hazards ({skipped} skipped), {affected}/{} edges affected",
        hazards.len(),
        network.edge_count()
    );

    AnnotatedNetwork::from_parts(network, edge_probs, node_probs)
}

fn apply_max(current: &mut f64, contribution: f64) {
    if contribution > *current {
        *current = contribution;
    }
}

/// Kind-specific influence test: buffered distance for points and
/// lines, geometric intersection for polygons (no radius).
fn influences(hazard: &HazardGeometry, edge: &geo::LineString<f64>, radius_m: f64) -> bool {
    match hazard {
        HazardGeometry::Point(p) => distance_to_line_m(*p, edge) <= radius_m,
        HazardGeometry::Line(line) => {
            // Vertex distances alone miss a crossing between vertices.
            line.intersects(edge)
                || line.points().any(|p| distance_to_line_m(p, edge) <= radius_m)
                || edge.points().any(|p| distance_to_line_m(p, line) <= radius_m)
        }
        HazardGeometry::Polygon(poly) => poly.intersects(edge),
    }
}

/// Haversine distance in meters from a point to the closest point of a
/// linestring. Closest-point projection happens in degree space, which
/// is accurate at municipal scale.
fn distance_to_line_m(point: Point<f64>, line: &geo::LineString<f64>) -> f64 {
    match line.closest_point(&point) {
        Closest::Intersection(_) => 0.0,
        Closest::SinglePoint(cp) => Haversine.distance(point, cp),
        Closest::Indeterminate => f64::INFINITY,
    }
}

/// Hazard bounding box padded by the influence radius, in degrees.
fn hazard_envelope(geometry: &HazardGeometry, radius_m: f64) -> Option<AABB<[f64; 2]>> {
    let rect = match geometry {
        HazardGeometry::Point(p) => geo::Rect::new(p.0, p.0),
        HazardGeometry::Line(l) => l.bounding_rect()?,
        HazardGeometry::Polygon(p) => p.bounding_rect()?,
    };
    // Polygons influence by intersection only; no padding needed.
    let pad_m = match geometry {
        HazardGeometry::Polygon(_) => 0.0,
        _ => radius_m,
    };
    let lat = (rect.min().y + rect.max().y) / 2.0;
    let lat_pad = pad_m / METERS_PER_DEGREE;
    let lon_pad = pad_m / (METERS_PER_DEGREE * lat.to_radians().cos().abs().max(0.2));
    Some(AABB::from_corners(
        [rect.min().x - lon_pad, rect.min().y - lat_pad],
        [rect.max().x + lon_pad, rect.max().y + lat_pad],
    ))
}
