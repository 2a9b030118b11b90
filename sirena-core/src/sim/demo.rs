//! Synthetic demonstration hazards along a computed route
//!
//! Exercises downstream visualization and test harnesses without live
//! feeds. Demo hazards must never be fed back into `annotate` for the
//! same routing decision - they are a presentation aid, not part of the
//! risk model.

use geo::{
    Coord, Destination, Euclidean, Haversine, InterpolatableLine, LineString, Point, Polygon,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::routing::RouteResult;
use crate::threat::{Hazard, HazardGeometry, HazardKind, HazardSubtype};

/// One demo hazard per this many meters of route.
const METERS_PER_HAZARD: f64 = 2_000.0;
/// Bounds on the generated count regardless of route length.
const MIN_HAZARDS: usize = 1;
const MAX_HAZARDS: usize = 8;
/// Largest lateral offset from the route line, meters.
const MAX_OFFSET_M: f64 = 30.0;
/// Half-size of a synthetic weather cell, degrees.
const WEATHER_CELL_HALF_DEG: f64 = 0.005;

/// Synthesizes plausible hazards placed at random offsets along the
/// route, with kind, subtype and severity drawn from weighted
/// distributions. Deterministic for a fixed seed.
pub fn generate_demo_hazards(route: &RouteResult, seed: u64) -> Vec<Hazard> {
    let mut rng = StdRng::seed_from_u64(seed);
    let count = ((route.total_length_m / METERS_PER_HAZARD).round() as usize)
        .clamp(MIN_HAZARDS, MAX_HAZARDS);

    (0..count)
        .filter_map(|i| {
            let fraction = rng.gen_range(0.05..0.95);
            let on_route = route.geometry.point_at_ratio_from_start(&Euclidean, fraction)?;
            let bearing = rng.gen_range(0.0..360.0);
            let offset = rng.gen_range(0.0..MAX_OFFSET_M);
            let anchor = Haversine.destination(on_route, bearing, offset);

            let (kind, subtype) = draw_kind(&mut rng);
            let severity = draw_severity(&mut rng);
            let geometry = match kind {
                HazardKind::Weather => HazardGeometry::Polygon(weather_cell(anchor)),
                _ => HazardGeometry::Point(anchor),
            };

            Some(Hazard {
                id: format!("demo-{i}"),
                source: "synthetic".to_string(),
                kind,
                subtype,
                severity,
                geometry,
                metrics: None,
            })
        })
        .collect()
}

/// Weighted kind/subtype draw: incidents dominate, weather is rare.
fn draw_kind(rng: &mut StdRng) -> (HazardKind, HazardSubtype) {
    match rng.gen_range(0..10u8) {
        0 => (HazardKind::Incident, HazardSubtype::Closure),
        1..=2 => (HazardKind::Incident, HazardSubtype::TrafficJam),
        3..=4 => (HazardKind::Incident, HazardSubtype::Accident),
        5..=7 => (HazardKind::Obstacle, HazardSubtype::PhysicalObstacle),
        8 => (HazardKind::Weather, HazardSubtype::HeavyRain),
        _ => (HazardKind::Weather, HazardSubtype::LowVisibility),
    }
}

/// Severity skewed toward the low end: the minimum of two uniform
/// draws over 1..=5.
fn draw_severity(rng: &mut StdRng) -> f64 {
    let a = rng.gen_range(1..=5);
    let b = rng.gen_range(1..=5);
    f64::from(a.min(b))
}

fn weather_cell(center: Point<f64>) -> Polygon<f64> {
    let (x, y) = (center.x(), center.y());
    let d = WEATHER_CELL_HALF_DEG;
    Polygon::new(
        LineString::from(vec![
            Coord { x: x - d, y: y - d },
            Coord { x: x + d, y: y - d },
            Coord { x: x + d, y: y + d },
            Coord { x: x - d, y: y + d },
            Coord { x: x - d, y: y - d },
        ]),
        vec![],
    )
}
