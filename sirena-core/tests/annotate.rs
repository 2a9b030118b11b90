mod common;

use common::*;
use sirena_core::prelude::*;

/// Tight policy so only the hazard's own edge is influenced in the
/// 100 m corridor fixture.
fn tight_policy() -> ThreatPolicy {
    ThreatPolicy {
        incident_radius_m: 10.0,
        obstacle_radius_m: 10.0,
        ..Default::default()
    }
}

#[test]
fn probabilities_stay_within_unit_interval() {
    let network = corridor_network();
    let hazards = vec![
        hazard_at_bc("incident", "closure", 5.0),
        hazard_at_bc("weather", "low_visibility", 5.0),
        hazard_at_bc("obstacle", "physical_obstacle", 1.0),
    ];
    let annotated = annotate(network, &hazards, &ThreatPolicy::default());

    for &p in annotated.edge_fail_probs() {
        assert!((0.0..=1.0).contains(&p), "edge probability {p} out of range");
    }
    for &p in annotated.node_fail_probs() {
        assert!((0.0..=1.0).contains(&p), "node probability {p} out of range");
    }
}

#[test]
fn aggregation_takes_maximum_never_sum() {
    let network = corridor_network();
    let strong = hazard_at_bc("incident", "closure", 3.0); // 0.95
    let weak = hazard_at_bc("obstacle", "physical_obstacle", 1.0); // 0.05

    let alone = annotate(network.clone(), &[strong.clone()], &tight_policy());
    let both = annotate(network.clone(), &[strong, weak], &tight_policy());

    let slot = network.edge_slot(20).unwrap();
    assert_eq!(alone.edge_fail_prob(slot), 0.95);
    // Adding a weak co-located hazard must not change the probability.
    assert_eq!(both.edge_fail_prob(slot), 0.95);
}

#[test]
fn only_nearby_edges_are_influenced() {
    let network = corridor_network();
    let annotated = annotate(
        network.clone(),
        &[hazard_at_bc("incident", "closure", 3.0)],
        &tight_policy(),
    );

    assert_eq!(annotated.edge_fail_prob(network.edge_slot(20).unwrap()), 0.95);
    for id in [10, 30, 40, 50] {
        assert_eq!(
            annotated.edge_fail_prob(network.edge_slot(id).unwrap()),
            0.0,
            "edge {id} should be outside the influence radius"
        );
    }
}

#[test]
fn node_probabilities_follow_incident_edges() {
    let network = corridor_network();
    let annotated = annotate(
        network.clone(),
        &[hazard_at_bc("incident", "traffic_jam", 3.0)],
        &tight_policy(),
    );

    // B and C terminate the influenced edge; A and D do not touch it.
    let prob_of = |id: NodeId| annotated.node_fail_prob(network.node_by_id(id).unwrap());
    assert_eq!(prob_of(2), 0.4);
    assert_eq!(prob_of(3), 0.4);
    assert_eq!(prob_of(1), 0.0);
    assert_eq!(prob_of(4), 0.0);
}

#[test]
fn severity_scales_weather_contributions() {
    let network = corridor_network();
    let mild = annotate(
        network.clone(),
        &[hazard_at_bc("weather", "heavy_rain", 1.0)],
        &tight_policy(),
    );
    let severe = annotate(
        network.clone(),
        &[hazard_at_bc("weather", "heavy_rain", 4.0)],
        &tight_policy(),
    );

    let slot = network.edge_slot(20).unwrap();
    assert!((mild.edge_fail_prob(slot) - 0.3).abs() < 1e-12);
    assert!((severe.edge_fail_prob(slot) - 0.9).abs() < 1e-12);
}

#[test]
fn polygon_hazards_influence_by_intersection() {
    let network = corridor_network();
    // Cell covering the B-C midpoint; no buffer radius applies.
    let cell = geo::Polygon::new(
        geo::LineString::from(vec![
            (1.2 * DEG_100M, -0.0001),
            (1.8 * DEG_100M, -0.0001),
            (1.8 * DEG_100M, 0.0001),
            (1.2 * DEG_100M, 0.0001),
            (1.2 * DEG_100M, -0.0001),
        ]),
        vec![],
    );
    let polygon = geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&cell))),
        id: None,
        properties: Some(
            serde_json::json!({
                "kind": "weather",
                "subtype": "low_visibility",
                "severity": 2.0,
                "source": "test",
            })
            .as_object()
            .cloned()
            .unwrap(),
        ),
        foreign_members: None,
    };
    let hazard = Hazard::from_feature(&polygon).unwrap();
    let annotated = annotate(network.clone(), &[hazard], &ThreatPolicy::default());

    assert!(annotated.edge_fail_prob(network.edge_slot(20).unwrap()) > 0.0);
    // Detour legs sit well outside the cell.
    assert_eq!(annotated.edge_fail_prob(network.edge_slot(40).unwrap()), 0.0);
}

#[test]
fn crossing_line_hazards_influence_the_crossed_edge() {
    let network = corridor_network();
    // North-south jam crossing B-C between its vertices; both of its
    // endpoints sit ~111 m from the corridor, far beyond the 10 m
    // radius, so only the crossing itself links it to the edge.
    let crossing = geo::LineString::from(vec![
        (1.5 * DEG_100M, -0.001),
        (1.5 * DEG_100M, 0.001),
    ]);
    let feature = geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&crossing))),
        id: None,
        properties: Some(
            serde_json::json!({
                "kind": "incident",
                "subtype": "traffic_jam",
                "severity": 2.0,
                "source": "test",
            })
            .as_object()
            .cloned()
            .unwrap(),
        ),
        foreign_members: None,
    };
    let hazard = Hazard::from_feature(&feature).unwrap();
    let annotated = annotate(network.clone(), &[hazard], &tight_policy());

    assert_eq!(annotated.edge_fail_prob(network.edge_slot(20).unwrap()), 0.4);
    for id in [10, 30, 40, 50] {
        assert_eq!(
            annotated.edge_fail_prob(network.edge_slot(id).unwrap()),
            0.0,
            "edge {id} is not crossed and sits outside the radius"
        );
    }
}

#[test]
fn annotate_is_idempotent() {
    let network = corridor_network();
    let hazards = vec![
        hazard_at_bc("incident", "closure", 3.0),
        hazard_at_bc("weather", "strong_wind", 2.0),
    ];
    let first = annotate(network.clone(), &hazards, &ThreatPolicy::default());
    let second = annotate(network.clone(), &hazards, &ThreatPolicy::default());

    assert_eq!(first.edge_fail_probs(), second.edge_fail_probs());
    assert_eq!(first.node_fail_probs(), second.node_fail_probs());
}

#[test]
fn reannotation_replaces_prior_probabilities() {
    let network = corridor_network();
    let with_hazard = annotate(
        network.clone(),
        &[hazard_at_bc("incident", "closure", 3.0)],
        &tight_policy(),
    );
    let cleared = annotate(network.clone(), &[], &tight_policy());

    let slot = network.edge_slot(20).unwrap();
    assert!(with_hazard.edge_fail_prob(slot) > 0.0);
    assert_eq!(cleared.edge_fail_prob(slot), 0.0);
}

#[test]
fn malformed_hazards_are_skipped_not_fatal() {
    let network = corridor_network();
    let degenerate = Hazard {
        geometry: HazardGeometry::Point(geo::Point::new(f64::NAN, 0.0)),
        ..hazard_at_bc("incident", "closure", 3.0)
    };
    let good = hazard_at_bc("incident", "traffic_jam", 3.0);

    let annotated = annotate(network.clone(), &[degenerate, good], &tight_policy());
    // The good hazard still lands.
    assert_eq!(annotated.edge_fail_prob(network.edge_slot(20).unwrap()), 0.4);
}

#[test]
fn feed_parsing_skips_broken_features() {
    let good = geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&geo::Point::new(
            0.0, 0.0,
        )))),
        id: None,
        properties: Some(
            serde_json::json!({"kind": "incident", "subtype": "accident", "severity": 2})
                .as_object()
                .cloned()
                .unwrap(),
        ),
        foreign_members: None,
    };
    let broken = geojson::Feature {
        bbox: None,
        geometry: None,
        id: None,
        properties: Some(
            serde_json::json!({"kind": "incident"}).as_object().cloned().unwrap(),
        ),
        foreign_members: None,
    };
    let collection = geojson::FeatureCollection {
        bbox: None,
        features: vec![good, broken],
        foreign_members: None,
    };

    let hazards = hazards_from_feed(&collection);
    assert_eq!(hazards.len(), 1);
    assert_eq!(hazards[0].subtype, HazardSubtype::Accident);
}
